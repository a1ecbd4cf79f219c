//! Scan command - Scan sources and report violations

use colored::Colorize;
use std::fs;
use tracing::info;

use super::{OutputFormat, ScanArgs};
use crate::cli::output::{JsonOutput, ReportRenderer, SarifOutput, ScanReport, TerminalOutput};
use crate::error::GuardError;
use crate::rules::ThreatScanner;
use crate::scanner::collect_sources;
use crate::utils::language_detection::Language;
use crate::utils::timing::Timer;

pub async fn execute(args: ScanArgs) -> Result<i32, GuardError> {
    let timer = Timer::start();
    let language = args.language.as_deref().map(Language::from_tag);

    let sources = collect_sources(&args.paths, language.as_ref())?;
    let scanner = ThreatScanner::new();

    let mut report = ScanReport::new();
    for source in &sources {
        let result = scanner.scan(&source.content, &source.language);
        report.push(source.path.clone(), source.language.name(), result);
    }

    info!(
        sources = report.sources().len(),
        violations = report.total_violations(),
        elapsed = %timer.elapsed_formatted(),
        "Scan finished"
    );

    let renderer: Box<dyn ReportRenderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Sarif => Box::new(SarifOutput::new()),
    };
    let rendered = renderer.render_report(&report)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered).map_err(|e| GuardError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })?;
            eprintln!(
                "{} Report written to: {}",
                "Success:".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(report.exit_code())
}

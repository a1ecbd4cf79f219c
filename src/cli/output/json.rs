//! JSON output formatting

use serde::Serialize;

use super::{ReportRenderer, ScanReport};
use crate::error::GuardError;
use crate::rules::{ScanOutcome, Violation};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    version: &'static str,
    summary: ReportSummary,
    sources: Vec<SourceOutput<'a>>,
}

#[derive(Serialize)]
struct ReportSummary {
    sources: usize,
    blocked: usize,
    warnings: usize,
    validated: usize,
    violations: usize,
}

#[derive(Serialize)]
struct SourceOutput<'a> {
    path: &'a str,
    language: &'a str,
    outcome: ScanOutcome,
    valid: bool,
    score: u8,
    rating: &'static str,
    summary: String,
    violations: &'a [Violation],
}

impl ReportRenderer for JsonOutput {
    fn render_report(&self, report: &ScanReport) -> Result<String, GuardError> {
        let output = ReportOutput {
            version: env!("CARGO_PKG_VERSION"),
            summary: ReportSummary {
                sources: report.sources().len(),
                blocked: report.count_outcome(ScanOutcome::Blocked),
                warnings: report.count_outcome(ScanOutcome::Warning),
                validated: report.count_outcome(ScanOutcome::Validated),
                violations: report.total_violations(),
            },
            sources: report
                .sources()
                .iter()
                .map(|s| SourceOutput {
                    path: &s.path,
                    language: &s.language,
                    outcome: s.result.outcome(),
                    valid: s.result.is_valid(),
                    score: s.result.score(),
                    rating: s.result.rating(),
                    summary: s.result.summary(),
                    violations: s.result.violations(),
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ThreatScanner;
    use crate::utils::language_detection::Language;

    #[test]
    fn test_render_report() {
        let scanner = ThreatScanner::new();
        let mut report = ScanReport::new();
        report.push("clean.js", "javascript", scanner.scan("let a = 1;", &Language::JavaScript));
        report.push("bad.sh", "sh", scanner.scan("rm -rf /tmp", &Language::from_tag("sh")));

        let rendered = JsonOutput::new().render_report(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["summary"]["sources"], 2);
        assert_eq!(json["summary"]["blocked"], 1);
        assert_eq!(json["summary"]["validated"], 1);
        assert_eq!(json["sources"][0]["outcome"], "validated");
        assert_eq!(json["sources"][0]["score"], 100);
        assert_eq!(json["sources"][1]["valid"], false);
        assert_eq!(json["sources"][1]["score"], 70);
        assert_eq!(json["sources"][1]["violations"][0]["type"], "malicious");
        assert_eq!(json["sources"][1]["violations"][0]["severity"], "critical");
        assert_eq!(json["sources"][1]["violations"][0]["rule"], "system-commands");
    }

    #[test]
    fn test_render_empty_report() {
        let rendered = JsonOutput::new().render_report(&ScanReport::new()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["summary"]["sources"], 0);
        assert!(json["sources"].as_array().unwrap().is_empty());
    }
}

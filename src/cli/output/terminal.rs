//! Terminal output formatting with colors

use colored::{ColoredString, Colorize};

use super::{ReportRenderer, ScanReport, SourceReport};
use crate::error::GuardError;
use crate::events::{EventSeverity, SecurityEvent};
use crate::orchestrator::SecurityStatus;
use crate::rules::{ScanOutcome, ScanResult, Severity, Violation};
use crate::utils::timing::format_countdown;

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_header(&self, report: &ScanReport) -> String {
        format!(
            "\n{} v{}\n\n{} {}\n",
            "ideguard".cyan().bold(),
            env!("CARGO_PKG_VERSION"),
            "Sources:".dimmed(),
            report.sources().len().to_string().white().bold()
        )
    }

    fn format_source(&self, source: &SourceReport) -> String {
        let mut output = format!(
            "\n{}\n{} {} {}\n",
            "━".repeat(50).dimmed(),
            outcome_badge(source.result.outcome()),
            source.path.white().bold(),
            format!("[{}]", source.language).dimmed()
        );
        output.push_str(&self.format_result(&source.result));
        output
    }

    /// Score, verdict and violations of one scan
    pub fn format_result(&self, result: &ScanResult) -> String {
        let mut output = format!(
            "  Score: {}/100 ({})\n  {}\n",
            score_colored(result.score()),
            result.rating(),
            result.summary()
        );

        for violation in result.violations() {
            output.push_str(&self.format_violation(violation));
        }

        output
    }

    fn format_violation(&self, violation: &Violation) -> String {
        let location = violation
            .line
            .map(|line| format!(" line {line}"))
            .unwrap_or_default();

        let mut output = format!(
            "  {} {} [{}]{} {}\n",
            "•".dimmed(),
            severity_colored(violation.severity),
            violation.kind.name().cyan(),
            location.dimmed(),
            violation.message
        );

        if let Some(suggestion) = &violation.suggestion {
            output.push_str(&format!("    {} {}\n", "└─".dimmed(), suggestion.dimmed()));
        }

        output
    }

    fn format_summary(&self, report: &ScanReport) -> String {
        let mut output = format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SUMMARY".bold()
        );

        output.push_str(&format!(
            "Blocked: {} │ Warnings: {} │ Validated: {} │ Violations: {}\n",
            report.count_outcome(ScanOutcome::Blocked).to_string().red().bold(),
            report.count_outcome(ScanOutcome::Warning).to_string().yellow().bold(),
            report.count_outcome(ScanOutcome::Validated).to_string().green().bold(),
            report.total_violations()
        ));

        output
    }

    /// Dashboard view of the orchestrator
    pub fn format_status(&self, status: &SecurityStatus) -> String {
        let mut output = format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SECURITY STATUS".bold()
        );

        let state = if status.active {
            "ACTIVE".green().bold()
        } else {
            "INACTIVE".red().bold()
        };
        output.push_str(&format!("  System:          {}\n", state));
        output.push_str(&format!("  Level:           {}\n", status.level.name().yellow()));

        let auth = if status.authenticated {
            "authenticated".green().to_string()
        } else if status.auth.is_locked() {
            format!("locked ({})", format_countdown(status.auth.lockout_remaining()))
                .red()
                .to_string()
        } else {
            format!(
                "step {}/{}",
                status.auth.current_step().unwrap_or(1),
                status.level.step_count()
            )
            .yellow()
            .to_string()
        };
        output.push_str(&format!("  Authentication:  {}\n", auth));

        let threats = if status.active_threats > 0 {
            status.active_threats.to_string().red().bold()
        } else {
            status.active_threats.to_string().green()
        };
        output.push_str(&format!("  Active threats:  {}\n", threats));

        let last_scan = status
            .last_scan_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        output.push_str(&format!("  Last scan:       {}\n", last_scan));
        if status.scanning {
            output.push_str(&format!("  {}\n", "Scan in progress...".cyan()));
        }

        output.push_str("\n  Components:\n");
        for (name, up) in status.components.entries() {
            let mark = if up { "●".green() } else { "●".red() };
            output.push_str(&format!("    {} {}\n", mark, name));
        }

        output
    }

    /// Event log, newest first, at most `limit` entries
    pub fn format_events(&self, events: &[SecurityEvent], limit: usize) -> String {
        let mut output = format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SECURITY EVENTS".bold()
        );

        if events.is_empty() {
            output.push_str(&format!("  {}\n", "No events recorded.".dimmed()));
            return output;
        }

        for event in events.iter().take(limit) {
            output.push_str(&format!(
                "  {} {} [{}] {}\n",
                event.timestamp.format("%H:%M:%S").to_string().dimmed(),
                event_severity_colored(event.severity),
                event.kind.as_str().cyan(),
                event.message
            ));
        }

        if events.len() > limit {
            output.push_str(&format!(
                "  {}\n",
                format!("... {} older events", events.len() - limit).dimmed()
            ));
        }

        output
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_report(&self, report: &ScanReport) -> Result<String, GuardError> {
        let mut output = self.format_header(report);

        for source in report.sources() {
            output.push_str(&self.format_source(source));
        }

        output.push_str(&self.format_summary(report));

        Ok(output)
    }
}

fn outcome_badge(outcome: ScanOutcome) -> ColoredString {
    match outcome {
        ScanOutcome::Blocked => "❌ BLOCKED".red().bold(),
        ScanOutcome::Warning => "⚠️  WARNING".yellow().bold(),
        ScanOutcome::Validated => "✅ VALIDATED".green().bold(),
    }
}

fn score_colored(score: u8) -> ColoredString {
    let text = score.to_string();
    match score {
        80..=100 => text.green().bold(),
        60..=79 => text.yellow().bold(),
        40..=59 => text.bright_red().bold(),
        _ => text.red().bold(),
    }
}

fn severity_colored(severity: Severity) -> ColoredString {
    let label = severity.name().to_uppercase();
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.bright_red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.blue(),
    }
}

fn event_severity_colored(severity: EventSeverity) -> ColoredString {
    match severity {
        EventSeverity::High => severity.as_str().red().bold(),
        EventSeverity::Medium => severity.as_str().yellow(),
        EventSeverity::Info => severity.as_str().blue(),
    }
}

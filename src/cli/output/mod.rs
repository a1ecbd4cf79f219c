//! Output formatting module for CLI

pub mod json;
mod sarif;
mod terminal;

pub use json::JsonOutput;
pub use sarif::SarifOutput;
pub use terminal::TerminalOutput;

use serde::Serialize;

use crate::error::GuardError;
use crate::exit_codes;
use crate::rules::{ScanOutcome, ScanResult};

/// Result of scanning one source
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub path: String,
    pub language: String,
    pub result: ScanResult,
}

/// Results of one `scan` invocation, in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    sources: Vec<SourceReport>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, language: &str, result: ScanResult) {
        self.sources.push(SourceReport {
            path: path.into(),
            language: language.to_string(),
            result,
        });
    }

    pub fn sources(&self) -> &[SourceReport] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of sources with the given outcome
    pub fn count_outcome(&self, outcome: ScanOutcome) -> usize {
        self.sources
            .iter()
            .filter(|s| s.result.outcome() == outcome)
            .count()
    }

    pub fn total_violations(&self) -> usize {
        self.sources.iter().map(|s| s.result.violations().len()).sum()
    }

    /// Exit code for CI: any blocked source wins over warnings
    pub fn exit_code(&self) -> i32 {
        if self.count_outcome(ScanOutcome::Blocked) > 0 {
            exit_codes::CRITICAL_ISSUES
        } else if self.count_outcome(ScanOutcome::Warning) > 0 {
            exit_codes::WARNINGS
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Trait for rendering scan reports
pub trait ReportRenderer {
    fn render_report(&self, report: &ScanReport) -> Result<String, GuardError>;
}

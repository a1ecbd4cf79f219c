//! Threat scanning engine

use tracing::{debug, info, span, Level};

use super::categories::{LanguageStage, MaliciousStage, RestrictedStage, RuleStage};
use super::results::{ScanResult, Severity};
use crate::utils::language_detection::Language;

/// Classifies source text against the built-in rule stages.
///
/// `scan` is a total, deterministic function of `(code, language)`: every
/// stage always runs, even once a critical violation has been found, so the
/// caller sees everything that matched.
pub struct ThreatScanner {
    stages: Vec<Box<dyn RuleStage>>,
}

impl ThreatScanner {
    /// Create a scanner with the malicious, restricted and language stages
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(MaliciousStage),
                Box::new(RestrictedStage),
                Box::new(LanguageStage),
            ],
        }
    }

    /// Names of the stages, in evaluation order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Scan `code` and return its violations, score and verdict
    pub fn scan(&self, code: &str, language: &Language) -> ScanResult {
        let span = span!(Level::INFO, "scan", language = %language, bytes = code.len());
        let _guard = span.enter();

        let mut violations = Vec::new();
        let mut deducted: u32 = 0;

        for stage in &self.stages {
            let hits = stage.evaluate(code, language);
            debug!(stage = stage.name(), hits = hits.len(), "Stage completed");

            for hit in hits {
                deducted = deducted.saturating_add(hit.deduction);
                violations.push(hit.violation);
            }
        }

        let result = ScanResult::from_deductions(violations, deducted);

        info!(
            violations = result.violations().len(),
            critical = result.count_by_severity(Severity::Critical),
            score = result.score(),
            valid = result.is_valid(),
            "Scan complete"
        );

        result
    }
}

impl Default for ThreatScanner {
    fn default() -> Self {
        Self::new()
    }
}

//! # Scan Result Structures
//!
//! This module defines the data structures produced by a threat scan.
//!
//! ## Overview
//!
//! - [`Severity`] - How bad a violation is (Low, Medium, High, Critical)
//! - [`ViolationType`] - Why the triggering rule exists
//! - [`Violation`] - A single matched rule pattern
//! - [`ScanResult`] - Violations, score and verdict of one scan
//!
//! ## Examples
//!
//! ```rust
//! use ideguard::rules::{Severity, Violation, ViolationType};
//!
//! let violation = Violation::new(
//!     ViolationType::Malicious,
//!     Severity::Critical,
//!     "Detected potentially destructive system commands (system-commands)",
//! )
//! .with_line(3)
//! .with_suggestion("Remove or replace with secure alternatives");
//!
//! assert_eq!(violation.line, Some(3));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a violation.
///
/// The declaration order is the total order: `Low < Medium < High < Critical`.
/// It drives both display and how much a match costs the score.
///
/// ```rust
/// use ideguard::rules::Severity;
///
/// assert!(Severity::Critical > Severity::High);
/// assert_eq!(Severity::High.name(), "high");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    /// Any critical violation blocks the submitted code.
    Critical,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a rule exists, independent of how severe a match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationType {
    /// Destructive or hostile code (system commands, injection, mining).
    Malicious,
    /// Language-specific constructs that deserve review.
    Suspicious,
    /// Attempts to subvert the IDE's AI or compiler tooling.
    Restricted,
    /// Unsafe constructs. Reserved for collaborators; no built-in rule emits it.
    Unsafe,
}

impl ViolationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Malicious => "malicious",
            Self::Suspicious => "suspicious",
            Self::Restricted => "restricted",
            Self::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single matched (rule, pattern) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Kind of rule that produced this violation.
    #[serde(rename = "type")]
    pub kind: ViolationType,

    /// Severity recorded for display and verdict.
    pub severity: Severity,

    /// Rule message; malicious and restricted rules append `(category)`.
    pub message: String,

    /// Identifier of the triggering rule group, e.g. `system-commands`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// 1-based line of the first match, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Suggested remediation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(kind: ViolationType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            rule: None,
            line: None,
            suggestion: None,
        }
    }

    /// Set the rule identifier
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Set the line
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Coarse classification of a finished scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOutcome {
    /// At least one critical violation; execution is blocked.
    Blocked,
    /// Violations were found but none is critical.
    Warning,
    /// Nothing matched.
    Validated,
}

/// Result of scanning one piece of source text.
///
/// `score` is clamped to `0..=100` and `valid` is true iff no violation is
/// critical. Both are derived from the violations at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    violations: Vec<Violation>,
    score: u8,
    valid: bool,
}

impl ScanResult {
    /// Build a result from the accumulated violations and the total deduction.
    pub fn from_deductions(violations: Vec<Violation>, deducted: u32) -> Self {
        let score = 100u32.saturating_sub(deducted) as u8;
        let valid = !violations.iter().any(Violation::is_critical);
        Self {
            violations,
            score,
            valid,
        }
    }

    /// A clean result: no violations, score 100.
    pub fn clean() -> Self {
        Self::from_deductions(Vec::new(), 0)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of critical violations
    pub fn critical_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_critical()).count()
    }

    /// Count violations of the given severity
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Violations of the given type
    pub fn violations_by_type(&self, kind: ViolationType) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn outcome(&self) -> ScanOutcome {
        if !self.valid {
            ScanOutcome::Blocked
        } else if !self.violations.is_empty() {
            ScanOutcome::Warning
        } else {
            ScanOutcome::Validated
        }
    }

    /// Human label for the score band shown next to the number.
    pub fn rating(&self) -> &'static str {
        match self.score {
            80..=100 => "Secure",
            60..=79 => "Caution",
            40..=59 => "Warning",
            _ => "Dangerous",
        }
    }

    /// One-line summary of the verdict.
    pub fn summary(&self) -> String {
        match self.outcome() {
            ScanOutcome::Blocked => format!(
                "Found {} security issues. Code execution blocked.",
                self.violations.len()
            ),
            ScanOutcome::Warning => format!(
                "Found {} potential security concerns.",
                self.violations.len()
            ),
            ScanOutcome::Validated => {
                "No security violations detected. Code is safe to execute.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity) -> Violation {
        Violation::new(ViolationType::Suspicious, severity, "test")
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_violation_builder() {
        let v = Violation::new(ViolationType::Restricted, Severity::High, "msg")
            .with_line(7)
            .with_suggestion("fix it");

        assert_eq!(v.line, Some(7));
        assert_eq!(v.suggestion.as_deref(), Some("fix it"));
        assert!(!v.is_critical());
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let result = ScanResult::from_deductions(vec![violation(Severity::High)], 450);
        assert_eq!(result.score(), 0);
    }

    #[test]
    fn test_valid_iff_no_critical() {
        let ok = ScanResult::from_deductions(
            vec![violation(Severity::High), violation(Severity::Medium)],
            20,
        );
        assert!(ok.is_valid());
        assert_eq!(ok.outcome(), ScanOutcome::Warning);

        let blocked = ScanResult::from_deductions(
            vec![violation(Severity::Low), violation(Severity::Critical)],
            35,
        );
        assert!(!blocked.is_valid());
        assert_eq!(blocked.critical_count(), 1);
        assert_eq!(blocked.outcome(), ScanOutcome::Blocked);
    }

    #[test]
    fn test_clean_result() {
        let result = ScanResult::clean();
        assert!(result.is_clean());
        assert!(result.is_valid());
        assert_eq!(result.score(), 100);
        assert_eq!(result.outcome(), ScanOutcome::Validated);
        assert_eq!(result.rating(), "Secure");
    }

    #[test]
    fn test_rating_bands() {
        let rate = |deducted| ScanResult::from_deductions(Vec::new(), deducted).rating();
        assert_eq!(rate(20), "Secure");
        assert_eq!(rate(21), "Caution");
        assert_eq!(rate(40), "Caution");
        assert_eq!(rate(41), "Warning");
        assert_eq!(rate(60), "Warning");
        assert_eq!(rate(61), "Dangerous");
    }

    #[test]
    fn test_summary_messages() {
        let blocked = ScanResult::from_deductions(vec![violation(Severity::Critical)], 25);
        assert_eq!(
            blocked.summary(),
            "Found 1 security issues. Code execution blocked."
        );

        let warn = ScanResult::from_deductions(
            vec![violation(Severity::Medium), violation(Severity::Low)],
            10,
        );
        assert_eq!(warn.summary(), "Found 2 potential security concerns.");
    }

    #[test]
    fn test_violation_serializes_type_field() {
        let v = Violation::new(ViolationType::Malicious, Severity::Critical, "m");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "malicious");
        assert_eq!(json["severity"], "critical");
        assert!(json.get("line").is_none());
    }
}

//! Rule stages
//!
//! A scan runs three stages in a fixed order: malicious, restricted, then the
//! language-specific table. Each stage turns pattern hits into violations and
//! prices them with its own deduction schedule.

pub mod language;
pub mod malicious;
pub mod restricted;

use crate::rules::patterns::PatternRule;
use crate::rules::results::{Severity, Violation, ViolationType};
use crate::utils::language_detection::Language;

pub use language::LanguageStage;
pub use malicious::MaliciousStage;
pub use restricted::RestrictedStage;

/// A violation together with what it costs the score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub violation: Violation,
    pub deduction: u32,
}

/// One pass of the scanner over the submitted text
pub trait RuleStage: Send + Sync {
    /// Get the stage name
    fn name(&self) -> &'static str;

    /// Evaluate the stage's rules against `code`
    fn evaluate(&self, code: &str, language: &Language) -> Vec<Hit>;
}

/// Turn every matching (rule, matcher) pair into a hit.
///
/// When `tag_category` is set the rule's category is appended to the message
/// so the violation can be traced back to its rule group.
pub(crate) fn evaluate_rules(
    rules: &[PatternRule],
    code: &str,
    kind: ViolationType,
    tag_category: bool,
    deduction: impl Fn(Severity) -> u32,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for rule in rules {
        for found in rule.matches(code) {
            let message = if tag_category {
                format!("{} ({})", rule.message, rule.category)
            } else {
                rule.message.to_string()
            };

            let mut violation = Violation::new(kind, rule.severity, message)
                .with_rule(rule.category)
                .with_line(found.line);
            if let Some(suggestion) = rule.suggestion {
                violation = violation.with_suggestion(suggestion);
            }

            hits.push(Hit {
                violation,
                deduction: deduction(rule.severity),
            });
        }
    }

    hits
}

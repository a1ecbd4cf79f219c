//! Language-specific stage

use tracing::debug;

use super::{evaluate_rules, Hit, RuleStage};
use crate::rules::patterns::language_rules;
use crate::rules::results::{Severity, ViolationType};
use crate::utils::language_detection::Language;

pub struct LanguageStage;

impl LanguageStage {
    /// Score cost of one language-specific match
    pub fn deduction(severity: Severity) -> u32 {
        match severity {
            Severity::Critical => 25,
            Severity::High => 15,
            _ => 5,
        }
    }
}

impl RuleStage for LanguageStage {
    fn name(&self) -> &'static str {
        "language"
    }

    fn evaluate(&self, code: &str, language: &Language) -> Vec<Hit> {
        match language_rules(language) {
            Some(rules) => evaluate_rules(
                rules,
                code,
                ViolationType::Suspicious,
                false,
                Self::deduction,
            ),
            None => {
                debug!(language = %language, "No language-specific rules");
                Vec::new()
            }
        }
    }
}

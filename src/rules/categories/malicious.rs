//! Malicious code stage

use super::{evaluate_rules, Hit, RuleStage};
use crate::rules::patterns::MALICIOUS_RULES;
use crate::rules::results::{Severity, ViolationType};
use crate::utils::language_detection::Language;

pub struct MaliciousStage;

impl MaliciousStage {
    /// Score cost of one malicious match
    pub fn deduction(severity: Severity) -> u32 {
        match severity {
            Severity::Critical => 30,
            Severity::High => 20,
            _ => 10,
        }
    }
}

impl RuleStage for MaliciousStage {
    fn name(&self) -> &'static str {
        "malicious"
    }

    fn evaluate(&self, code: &str, _language: &Language) -> Vec<Hit> {
        evaluate_rules(
            &MALICIOUS_RULES,
            code,
            ViolationType::Malicious,
            true,
            Self::deduction,
        )
    }
}

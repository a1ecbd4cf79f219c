//! Restricted tooling stage

use super::{evaluate_rules, Hit, RuleStage};
use crate::rules::patterns::RESTRICTED_RULES;
use crate::rules::results::ViolationType;
use crate::utils::language_detection::Language;

/// Every restricted match costs the same, whatever its recorded severity.
pub const RESTRICTED_DEDUCTION: u32 = 40;

pub struct RestrictedStage;

impl RuleStage for RestrictedStage {
    fn name(&self) -> &'static str {
        "restricted"
    }

    fn evaluate(&self, code: &str, _language: &Language) -> Vec<Hit> {
        evaluate_rules(
            &RESTRICTED_RULES,
            code,
            ViolationType::Restricted,
            true,
            |_| RESTRICTED_DEDUCTION,
        )
    }
}

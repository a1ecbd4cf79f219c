//! Threat detection patterns
//!
//! Rule tables are compiled once, on first use, and never mutated.

pub mod language;
pub mod malicious;
pub mod restricted;

use regex::Regex;

use crate::rules::results::Severity;

pub use language::{language_rules, JAVASCRIPT_RULES, PHP_RULES, PYTHON_RULES};
pub use malicious::MALICIOUS_RULES;
pub use restricted::RESTRICTED_RULES;

/// A named group of related patterns sharing a detection theme
pub struct PatternRule {
    pub category: &'static str,
    pub matchers: Vec<Regex>,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: Option<&'static str>,
}

/// One matcher of a rule that hit the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Index of the matcher within its rule
    pub index: usize,
    /// 1-based line of the first match
    pub line: usize,
}

impl PatternRule {
    /// Evaluate every matcher against `code`, in declaration order.
    ///
    /// Each matcher contributes at most one hit regardless of how many times
    /// it occurs in the text.
    pub fn matches(&self, code: &str) -> Vec<PatternMatch> {
        self.matchers
            .iter()
            .enumerate()
            .filter_map(|(index, regex)| {
                regex.find(code).map(|m| PatternMatch {
                    index,
                    line: line_of(code, m.start()),
                })
            })
            .collect()
    }
}

/// 1-based line number of a byte offset
pub fn line_of(code: &str, offset: usize) -> usize {
    code[..offset].matches('\n').count() + 1
}

/// Compile a pattern from the built-in tables.
///
/// A leading `(?i)` is honored for ASCII letters only: `s` matches `S` but
/// not `ſ`, and `k` does not match the Kelvin sign. The regex crate's own
/// `(?i)` folds Unicode case and would flag text the rules do not describe.
///
/// The tables are literals checked by the tests below, so a failure here is a
/// programming error.
pub(crate) fn compile(pattern: &str) -> Regex {
    let source = match pattern.strip_prefix("(?i)") {
        Some(rest) => fold_ascii_case(rest),
        None => pattern.to_string(),
    };
    Regex::new(&source).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// Rewrite every ASCII letter of `pattern` into a class of both cases.
///
/// Escapes are copied untouched, so `\s` stays a class and `\$` a literal.
fn fold_ascii_case(pattern: &str) -> String {
    let mut folded = String::with_capacity(pattern.len() * 3);
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                folded.push(c);
                if let Some(escaped) = chars.next() {
                    folded.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                folded.push(c);
            }
            ']' if in_class => {
                in_class = false;
                folded.push(c);
            }
            c if c.is_ascii_alphabetic() => {
                let (lower, upper) = (c.to_ascii_lowercase(), c.to_ascii_uppercase());
                if !in_class {
                    folded.push('[');
                }
                folded.push(lower);
                folded.push(upper);
                if !in_class {
                    folded.push(']');
                }
            }
            c => folded.push(c),
        }
    }

    folded
}

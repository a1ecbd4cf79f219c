//! Language-specific patterns

use lazy_static::lazy_static;

use super::{compile, PatternRule};
use crate::rules::results::Severity;
use crate::utils::language_detection::Language;

const SUGGESTION: &str = "Review for security implications";

fn single(
    category: &'static str,
    pattern: &str,
    severity: Severity,
    message: &'static str,
) -> PatternRule {
    PatternRule {
        category,
        matchers: vec![compile(pattern)],
        severity,
        message,
        suggestion: Some(SUGGESTION),
    }
}

lazy_static! {
    pub static ref JAVASCRIPT_RULES: Vec<PatternRule> = vec![
        single(
            "javascript/timer-eval",
            r"(?i)setTimeout\s*\(.*eval|setInterval\s*\(.*eval",
            Severity::High,
            "Dangerous eval in timer",
        ),
        single(
            "javascript/storage",
            r"(?i)localStorage|sessionStorage|indexedDB",
            Severity::Medium,
            "Browser storage access",
        ),
        single(
            "javascript/browser-api",
            r"(?i)navigator\.|location\.|window\.",
            Severity::Medium,
            "Browser API access",
        ),
    ];

    pub static ref PYTHON_RULES: Vec<PatternRule> = vec![
        single(
            "python/dynamic-import",
            r"(?i)__import__\s*\(|importlib",
            Severity::High,
            "Dynamic import detected",
        ),
        single(
            "python/deserialization",
            r"(?i)pickle\.loads|marshal\.loads",
            Severity::Critical,
            "Unsafe deserialization",
        ),
        single(
            "python/input",
            r"(?i)input\s*\(.*\)|raw_input\s*\(",
            Severity::Medium,
            "User input without validation",
        ),
    ];

    pub static ref PHP_RULES: Vec<PatternRule> = vec![
        single(
            "php/dangerous-functions",
            r"(?i)eval\s*\(|assert\s*\(|system\s*\(",
            Severity::Critical,
            "Dangerous PHP functions",
        ),
        single(
            "php/superglobals",
            r"(?i)\$_GET|\$_POST|\$_REQUEST",
            Severity::Medium,
            "Unvalidated user input",
        ),
        single(
            "php/file-inclusion",
            r"(?i)include\s+|require\s+|file_get_contents",
            Severity::High,
            "File inclusion vulnerability",
        ),
    ];
}

/// Rule table for a language, or `None` when the language has no specific rules
pub fn language_rules(language: &Language) -> Option<&'static [PatternRule]> {
    match language {
        Language::JavaScript => Some(JAVASCRIPT_RULES.as_slice()),
        Language::Python => Some(PYTHON_RULES.as_slice()),
        Language::Php => Some(PHP_RULES.as_slice()),
        Language::Other(_) => None,
    }
}

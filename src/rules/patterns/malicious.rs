//! Malicious code patterns

use lazy_static::lazy_static;

use super::{compile, PatternRule};
use crate::rules::results::Severity;

const SUGGESTION: &str = "Remove or replace with secure alternatives";

lazy_static! {
    /// Rules for destructive or hostile code, evaluated first
    pub static ref MALICIOUS_RULES: Vec<PatternRule> = vec![
        PatternRule {
            category: "system-commands",
            matchers: vec![
                compile(r"(?i)rm\s+-rf\s+/|del\s+/s\s+/q|format\s+c:"),
                compile(r"(?i)eval\s*\(.*\)|exec\s*\(.*\)|system\s*\(.*\)"),
                compile(r"(?i)os\.system|subprocess\.call|shell_exec"),
                compile(r"(?i)document\.write|innerHTML\s*=|eval\("),
            ],
            severity: Severity::Critical,
            message: "Detected potentially destructive system commands",
            suggestion: Some(SUGGESTION),
        },
        PatternRule {
            category: "network-access",
            matchers: vec![
                compile(r"(?i)fetch\s*\(.*\)|axios\.|XMLHttpRequest|curl\s+"),
                compile(r"(?i)socket\.|connect\(|bind\(|listen\("),
                compile(r"(?i)import\s+requests|import\s+urllib|import\s+socket"),
            ],
            severity: Severity::High,
            message: "Unauthorized network access attempt detected",
            suggestion: Some(SUGGESTION),
        },
        PatternRule {
            category: "file-manipulation",
            matchers: vec![
                compile(r#"(?i)open\s*\(.*,\s*['"]w['"]|fopen\s*\(.*,\s*['"]w['"]"#),
                compile(r"(?i)unlink\s*\(|remove\s*\(|delete\s+"),
                compile(r"(?i)fs\.writeFile|fs\.unlinkSync|fs\.rmdir"),
            ],
            severity: Severity::High,
            message: "Suspicious file manipulation operations",
            suggestion: Some(SUGGESTION),
        },
        PatternRule {
            category: "code-injection",
            matchers: vec![
                // Template and shell interpolation is matched case-sensitively.
                compile(r"\$\{.*\}|\$\(.*\)|`.*`"),
                compile(r"(?i)<script.*>|</script>"),
                compile(r"(?i)javascript:|data:|vbscript:"),
                compile(r"(?i)base64|atob|btoa"),
            ],
            severity: Severity::High,
            message: "Potential code injection vulnerability",
            suggestion: Some(SUGGESTION),
        },
        PatternRule {
            category: "crypto-mining",
            matchers: vec![
                compile(r"(?i)crypto|mining|blockchain|bitcoin|ethereum"),
                compile(r"(?i)hash|sha256|md5"),
                compile(r"(?i)worker|webworker|serviceworker"),
            ],
            severity: Severity::Medium,
            message: "Potential cryptocurrency mining code",
            suggestion: Some(SUGGESTION),
        },
    ];
}

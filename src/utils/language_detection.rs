//! Language tags and detection
//!
//! The scanner keys its language-specific rule tables on [`Language`]. The set
//! of languages with dedicated rules is closed; every other tag lands in
//! [`Language::Other`], for which the language stage contributes nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Languages understood by the threat scanner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// JavaScript/TypeScript sources
    JavaScript,
    /// Python sources
    Python,
    /// PHP sources
    Php,
    /// Any other tag; carries the tag as given (lowercased)
    Other(String),
}

impl Language {
    /// Parse a language tag as sent by the editor.
    ///
    /// Only the exact tags `javascript`, `python` and `php` select a rule
    /// table; aliases such as `typescript` are unrecognized and skip the
    /// language stage. Never fails: unknown tags become [`Language::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "javascript" => Self::JavaScript,
            "python" => Self::Python,
            "php" => Self::Php,
            other => Self::Other(other.to_string()),
        }
    }

    /// Infer the language from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => Self::JavaScript,
            "py" | "pyw" => Self::Python,
            "php" | "phtml" => Self::Php,
            "" => Self::Other("plaintext".to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical tag
    pub fn name(&self) -> &str {
        match self {
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Php => "php",
            Self::Other(tag) => tag,
        }
    }

    /// Whether a dedicated rule table exists for this language
    pub fn has_specific_rules(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::JavaScript
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

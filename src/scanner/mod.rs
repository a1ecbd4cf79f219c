//! Scanner module - Collects source text to feed the threat scanner
//!
//! Inputs are files, directories (walked with gitignore support) or `-` for
//! standard input. Each source carries the language its rules are picked for.

mod filesystem;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GuardError;
use crate::utils::language_detection::Language;

pub use filesystem::{walk_directory, MAX_WALKED_FILE_SIZE};

/// Display name used for standard input
pub const STDIN_NAME: &str = "<stdin>";

/// A piece of source text ready to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as given or found while walking, `<stdin>` for standard input
    pub path: String,
    pub language: Language,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, language: Language, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language,
            content: content.into(),
        }
    }
}

/// Collect sources from the given inputs.
///
/// `language` overrides extension-based detection for every source. Files
/// named explicitly must be readable UTF-8 text; files found while walking a
/// directory are skipped when they are not.
pub fn collect_sources(
    inputs: &[PathBuf],
    language: Option<&Language>,
) -> Result<Vec<SourceFile>, GuardError> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.as_os_str() == "-" {
            sources.push(read_stdin(language)?);
        } else if input.is_dir() {
            for path in walk_directory(input) {
                match fs::read_to_string(&path) {
                    Ok(content) => sources.push(SourceFile::new(
                        path.display().to_string(),
                        detect(&path, language),
                        content,
                    )),
                    Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable file"),
                }
            }
        } else {
            sources.push(read_file(input, language)?);
        }
    }

    Ok(sources)
}

/// Read a single file
pub fn read_file(path: &Path, language: Option<&Language>) -> Result<SourceFile, GuardError> {
    let content = fs::read_to_string(path).map_err(|e| GuardError::SourceRead {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(SourceFile::new(
        path.display().to_string(),
        detect(path, language),
        content,
    ))
}

fn read_stdin(language: Option<&Language>) -> Result<SourceFile, GuardError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| GuardError::SourceRead {
            path: STDIN_NAME.to_string(),
            source: e,
        })?;
    let language = language.cloned().unwrap_or_default();
    Ok(SourceFile::new(STDIN_NAME, language, content))
}

fn detect(path: &Path, language: Option<&Language>) -> Language {
    language
        .cloned()
        .unwrap_or_else(|| Language::from_path(path))
}

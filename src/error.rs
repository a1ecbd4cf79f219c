//! Error types for IDEGuard
//!
//! Scanning and challenge evaluation are total: abnormal input is handled as
//! defined behavior there. The errors below cover configuration, gated access
//! to the dashboard, and the I/O performed by the CLI.

use thiserror::Error;

/// Main error type for IDEGuard
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dashboard operation attempted while the gate is closed
    #[error("Access denied: {0}")]
    Access(#[from] AccessError),

    /// Failed to read a source file
    #[error("Failed to read '{path}': {source}")]
    SourceRead {
        /// Path of the file that failed to read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        /// Path of the file that failed to write
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// JSON rendering failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Generic I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize config: {message}")]
    Serialize {
        /// Error message
        message: String,
    },

    /// A level requires a factor whose expected code is empty
    #[error("Level '{level}' requires a {factor} code but none is configured")]
    MissingFactor {
        /// Level name
        level: &'static str,
        /// Factor name
        factor: &'static str,
    },

    /// A numeric or enumerated setting is out of range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Dotted path of the setting
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },
}

/// Reasons an orchestrator operation was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The security system is switched off
    #[error("security system is inactive")]
    Inactive,

    /// The challenge has not been completed
    #[error("authentication required")]
    NotAuthenticated,
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::Config(ConfigError::Parse(err))
    }
}

impl From<toml::ser::Error> for GuardError {
    fn from(err: toml::ser::Error) -> Self {
        GuardError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}

//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, GuardError};

use super::levels::SecurityLevel;
use super::{AuthConfig, EventsConfig, MonitorConfig, ScanConfig};

pub const CONFIG_FILENAME: &str = ".ideguard.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Level the challenge starts at
    #[serde(default)]
    pub default_level: SecurityLevel,

    /// Scanner settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Challenge settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Event log settings
    #[serde(default)]
    pub events: EventsConfig,

    /// Threat monitor settings
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl Config {
    /// Load configuration from the working directory or return default
    pub fn load_or_default() -> Result<Self, GuardError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path when given, otherwise from the working directory
    pub fn load(path: Option<&Path>) -> Result<Self, GuardError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, GuardError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GuardError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        toml::from_str(&content).map_err(Into::into)
    }

    /// Create a default configuration starting at the given level
    pub fn with_level(level: SecurityLevel) -> Self {
        Self {
            default_level: level,
            ..Default::default()
        }
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, GuardError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Reject configurations the gate cannot run with.
    ///
    /// Called once at startup; a failure here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in SecurityLevel::ALL {
            for factor in level.factors() {
                if self.auth.factors.expected(level, *factor).trim().is_empty() {
                    return Err(ConfigError::MissingFactor {
                        level: level.name(),
                        factor: factor.name(),
                    });
                }
            }
        }

        if self.auth.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.max_attempts",
                message: "must be at least 1".to_string(),
            });
        }

        if self.auth.lockout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.lockout_secs",
                message: "must be at least 1".to_string(),
            });
        }

        if self.events.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "events.capacity",
                message: "must be at least 1".to_string(),
            });
        }

        if self.monitor.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor.interval_secs",
                message: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.monitor.threat_probability) {
            return Err(ConfigError::InvalidValue {
                field: "monitor.threat_probability",
                message: format!(
                    "{} is not a probability",
                    self.monitor.threat_probability
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_level, SecurityLevel::Enhanced);
        assert_eq!(config.scan.latency_ms, 2000);
        assert_eq!(config.auth.max_attempts, 3);
        assert_eq!(config.auth.lockout_secs, 300);
        assert_eq!(config.events.capacity, 100);
        assert_eq!(config.monitor.interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str(
            r#"
default_level = "maximum"

[scan]
latency_ms = 10
"#,
        )
        .unwrap();

        assert_eq!(config.default_level, SecurityLevel::Maximum);
        assert_eq!(config.scan.latency_ms, 10);
        assert_eq!(config.auth.lockout_secs, 300);
    }

    #[test]
    fn test_toml_roundtrip_keeps_level() {
        let config = Config::with_level(SecurityLevel::Basic);
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.default_level, SecurityLevel::Basic);
        assert_eq!(parsed.auth.factors, config.auth.factors);
    }

    #[test]
    fn test_missing_factor_is_fatal() {
        let mut config = Config::default();
        config.auth.factors.one_time.maximum = "  ".to_string();

        match config.validate() {
            Err(ConfigError::MissingFactor { level, factor }) => {
                assert_eq!(level, "maximum");
                assert_eq!(factor, "one-time");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unused_factor_may_be_empty() {
        // Basic only asks for the knowledge code.
        let mut config = Config::default();
        config.auth.factors.biometric.basic.clear();
        config.auth.factors.one_time.basic.clear();
        config.auth.factors.one_time.enhanced.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut config = Config::default();
        config.auth.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "auth.max_attempts", .. })
        ));

        let mut config = Config::default();
        config.monitor.threat_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "monitor.threat_probability", .. })
        ));

        let mut config = Config::default();
        config.events.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guard.toml");
        fs::write(&path, "default_level = \"basic\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_level, SecurityLevel::Basic);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, GuardError::Config(ConfigError::FileRead { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guard.toml");
        fs::write(&path, "[auth]\nlockout_secs = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, GuardError::Config(ConfigError::InvalidValue { .. })));
    }
}

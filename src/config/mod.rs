//! Configuration module

pub mod levels;
pub mod loader;

pub use levels::SecurityLevel;
pub use loader::Config;

use serde::{Deserialize, Serialize};

use crate::auth::FactorKind;

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Simulated latency before a scan result is delivered, in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_latency_ms() -> u64 {
    2000
}

/// Expected code of one factor, per level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FactorCodes {
    #[serde(default)]
    pub basic: String,
    #[serde(default)]
    pub enhanced: String,
    #[serde(default)]
    pub maximum: String,
}

impl FactorCodes {
    fn new(basic: &str, enhanced: &str, maximum: &str) -> Self {
        Self {
            basic: basic.to_string(),
            enhanced: enhanced.to_string(),
            maximum: maximum.to_string(),
        }
    }

    /// Code expected at the given level
    pub fn for_level(&self, level: SecurityLevel) -> &str {
        match level {
            SecurityLevel::Basic => &self.basic,
            SecurityLevel::Enhanced => &self.enhanced,
            SecurityLevel::Maximum => &self.maximum,
        }
    }
}

/// Static per-level code tables, one per factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorsConfig {
    /// Step 1 codes
    #[serde(default = "default_knowledge_codes")]
    pub knowledge: FactorCodes,

    /// Step 2 codes
    #[serde(default = "default_biometric_codes")]
    pub biometric: FactorCodes,

    /// Step 3 codes
    #[serde(default = "default_one_time_codes")]
    pub one_time: FactorCodes,
}

impl Default for FactorsConfig {
    fn default() -> Self {
        Self {
            knowledge: default_knowledge_codes(),
            biometric: default_biometric_codes(),
            one_time: default_one_time_codes(),
        }
    }
}

impl FactorsConfig {
    /// Table for a factor
    pub fn codes(&self, factor: FactorKind) -> &FactorCodes {
        match factor {
            FactorKind::Knowledge => &self.knowledge,
            FactorKind::Biometric => &self.biometric,
            FactorKind::OneTime => &self.one_time,
        }
    }

    /// Expected value for a (level, factor) pair
    pub fn expected(&self, level: SecurityLevel, factor: FactorKind) -> &str {
        self.codes(factor).for_level(level)
    }
}

fn default_knowledge_codes() -> FactorCodes {
    FactorCodes::new(
        "SECURE2025",
        "DEEPBLUE-SECURITY-001",
        "OCTOPUS-MAXIMUM-SECURITY-2025",
    )
}

fn default_biometric_codes() -> FactorCodes {
    FactorCodes::new("1234", "987654", "BIOMETRIC-AUTH-001")
}

fn default_one_time_codes() -> FactorCodes {
    FactorCodes::new("2FA", "2FA-ENHANCED", "2FA-MAXIMUM-001")
}

/// Challenge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Failed attempts, counted across all steps, that trigger a lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u8,

    /// Lockout duration in seconds
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u32,

    /// Expected codes
    #[serde(default)]
    pub factors: FactorsConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            lockout_secs: default_lockout_secs(),
            factors: FactorsConfig::default(),
        }
    }
}

fn default_max_attempts() -> u8 {
    3
}

fn default_lockout_secs() -> u32 {
    300
}

/// Event log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Most recent events kept
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    100
}

/// Simulated threat monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Whether the monitor runs while the system is active
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between monitor ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Chance that a tick reports a blocked threat
    #[serde(default = "default_threat_probability")]
    pub threat_probability: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
            threat_probability: default_threat_probability(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    30
}

fn default_threat_probability() -> f64 {
    0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codes() {
        let factors = FactorsConfig::default();
        assert_eq!(
            factors.expected(SecurityLevel::Basic, FactorKind::Knowledge),
            "SECURE2025"
        );
        assert_eq!(
            factors.expected(SecurityLevel::Enhanced, FactorKind::Biometric),
            "987654"
        );
        assert_eq!(
            factors.expected(SecurityLevel::Maximum, FactorKind::OneTime),
            "2FA-MAXIMUM-001"
        );
    }

    #[test]
    fn test_partial_factor_table_keeps_defaults() {
        let auth: AuthConfig = toml::from_str(
            r#"
[factors.biometric]
basic = "0000"
enhanced = "1111"
maximum = "2222"
"#,
        )
        .unwrap();

        assert_eq!(auth.max_attempts, 3);
        assert_eq!(auth.factors.biometric.basic, "0000");
        assert_eq!(auth.factors.knowledge, default_knowledge_codes());
    }
}

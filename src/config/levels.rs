//! Security levels

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::FactorKind;

/// How many challenge factors must be passed to open the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Knowledge code only
    Basic,
    /// Knowledge and biometric codes
    Enhanced,
    /// Knowledge, biometric and one-time codes
    Maximum,
}

impl SecurityLevel {
    /// All levels in cycle order
    pub const ALL: [SecurityLevel; 3] = [Self::Basic, Self::Enhanced, Self::Maximum];

    /// Get level from name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "basic" | "low" => Some(Self::Basic),
            "enhanced" | "standard" => Some(Self::Enhanced),
            "maximum" | "max" => Some(Self::Maximum),
            _ => None,
        }
    }

    /// Get the name of the level
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enhanced => "enhanced",
            Self::Maximum => "maximum",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "Security code",
            Self::Enhanced => "Security code and biometric verification",
            Self::Maximum => "Security code, biometric verification and two-factor code",
        }
    }

    /// Number of challenge steps required
    pub fn step_count(&self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Enhanced => 2,
            Self::Maximum => 3,
        }
    }

    /// Factors asked for, in step order
    pub fn factors(&self) -> &'static [FactorKind] {
        match self {
            Self::Basic => &[FactorKind::Knowledge],
            Self::Enhanced => &[FactorKind::Knowledge, FactorKind::Biometric],
            Self::Maximum => &FactorKind::ALL,
        }
    }

    /// Next level in the basic → enhanced → maximum → basic cycle
    pub fn next(&self) -> Self {
        match self {
            Self::Basic => Self::Enhanced,
            Self::Enhanced => Self::Maximum,
            Self::Maximum => Self::Basic,
        }
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        Self::Enhanced
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Challenge factors

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent factor types, in the order they are asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Step 1: static security code
    Knowledge,
    /// Step 2: biometric surrogate code
    Biometric,
    /// Step 3: one-time code
    OneTime,
}

impl FactorKind {
    pub const ALL: [FactorKind; 3] = [Self::Knowledge, Self::Biometric, Self::OneTime];

    /// Factor asked for at a 1-based step
    pub fn for_step(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::Knowledge),
            2 => Some(Self::Biometric),
            3 => Some(Self::OneTime),
            _ => None,
        }
    }

    /// 1-based step this factor is asked at
    pub fn step(&self) -> u8 {
        match self {
            Self::Knowledge => 1,
            Self::Biometric => 2,
            Self::OneTime => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Biometric => "biometric",
            Self::OneTime => "one-time",
        }
    }

    /// Prompt label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::Knowledge => "Security code",
            Self::Biometric => "Biometric code",
            Self::OneTime => "Two-factor code",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

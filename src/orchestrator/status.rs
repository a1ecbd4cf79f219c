//! Read-only views of the orchestrator

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::{AuthOutcome, AuthSession};
use crate::config::SecurityLevel;
use crate::events::SecurityEvent;
use crate::rules::{ScanResult, Violation};

/// Display-only subsystem indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentHealth {
    pub firewall: bool,
    pub anti_malware: bool,
    pub code_validator: bool,
    pub auth_system: bool,
    pub monitoring: bool,
}

impl ComponentHealth {
    /// Indicators with their display names, in dashboard order
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("Firewall", self.firewall),
            ("Anti-malware", self.anti_malware),
            ("Code validator", self.code_validator),
            ("Auth system", self.auth_system),
            ("Monitoring", self.monitoring),
        ]
    }
}

impl Default for ComponentHealth {
    fn default() -> Self {
        Self {
            firewall: true,
            anti_malware: true,
            code_validator: true,
            auth_system: true,
            monitoring: true,
        }
    }
}

/// Snapshot of everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct SecurityStatus {
    pub active: bool,
    pub authenticated: bool,
    pub level: SecurityLevel,
    pub auth: AuthSession,
    pub active_threats: u64,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub last_result: Option<ScanResult>,
    /// A submitted scan has not been delivered yet
    pub scanning: bool,
    pub components: ComponentHealth,
    /// Newest first
    pub events: Vec<SecurityEvent>,
}

/// Pushed to subscribers as state changes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityNotification {
    ScanCompleted {
        generation: u64,
        valid: bool,
        score: u8,
        violations: Vec<Violation>,
    },
    Auth { outcome: AuthOutcome },
    LockoutTick { remaining_secs: u32 },
    ThreatDetected { active_threats: u64 },
    LevelChanged { level: SecurityLevel },
    Activated,
    Deactivated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_default_healthy() {
        let health = ComponentHealth::default();
        assert!(health.entries().iter().all(|(_, up)| *up));
        assert_eq!(health.entries()[0].0, "Firewall");
    }

    #[test]
    fn test_notification_serialization() {
        let json = serde_json::to_value(SecurityNotification::LockoutTick { remaining_secs: 42 }).unwrap();
        assert_eq!(json["type"], "lockout_tick");
        assert_eq!(json["remaining_secs"], 42);
    }
}

//! Security event log
//!
//! A bounded, append-only record of what the security system did. When full,
//! the oldest entry is evicted. Insertion order is the only ordering kept;
//! events are never reordered or coalesced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of events kept
pub const DEFAULT_CAPACITY: usize = 100;

/// Source recorded on events emitted by the orchestrator
pub const DEFAULT_SOURCE: &str = "security_system";

/// Kind of security event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SystemActivated,
    SystemDeactivated,
    AuthStepPassed,
    AuthFailure,
    AuthLockout,
    LockoutCleared,
    AuthSuccess,
    CodeBlocked,
    CodeWarning,
    CodeValidated,
    ThreatDetected,
    SecurityLevelChanged,
    ManualScan,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemActivated => "system_activated",
            Self::SystemDeactivated => "system_deactivated",
            Self::AuthStepPassed => "auth_step_passed",
            Self::AuthFailure => "auth_failure",
            Self::AuthLockout => "auth_lockout",
            Self::LockoutCleared => "lockout_cleared",
            Self::AuthSuccess => "auth_success",
            Self::CodeBlocked => "code_blocked",
            Self::CodeWarning => "code_warning",
            Self::CodeValidated => "code_validated",
            Self::ThreatDetected => "threat_detected",
            Self::SecurityLevelChanged => "security_level_changed",
            Self::ManualScan => "manual_scan",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    Info,
    Medium,
    High,
}

impl EventSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Monotonic per log, never reused
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub message: String,
    pub severity: EventSeverity,
    pub source: String,
}

/// Bounded ring of the most recent events
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<SecurityEvent>,
    capacity: usize,
    next_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Record an event from the security system and return its id
    pub fn append(
        &mut self,
        kind: EventKind,
        severity: EventSeverity,
        message: impl Into<String>,
    ) -> u64 {
        self.append_from(DEFAULT_SOURCE, kind, severity, message)
    }

    /// Record an event from a named source and return its id
    pub fn append_from(
        &mut self,
        source: &str,
        kind: EventKind,
        severity: EventSeverity,
        message: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::trace!(id = evicted.id, "Event log full, evicted oldest");
            }
        }

        self.entries.push_back(SecurityEvent {
            id,
            timestamp: Utc::now(),
            kind,
            message: message.into(),
            severity,
            source: source.to_string(),
        });

        id
    }

    /// Stored events, newest first
    pub fn entries(&self) -> impl Iterator<Item = &SecurityEvent> {
        self.entries.iter().rev()
    }

    /// Owned snapshot, newest first
    pub fn snapshot(&self) -> Vec<SecurityEvent> {
        self.entries().cloned().collect()
    }

    /// Most recent event
    pub fn latest(&self) -> Option<&SecurityEvent> {
        self.entries.back()
    }

    /// Remove every event. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_newest_first() {
        let mut log = EventLog::new();
        log.append(EventKind::ManualScan, EventSeverity::Info, "first");
        log.append(EventKind::CodeWarning, EventSeverity::Medium, "second");

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(log.latest().map(|e| e.kind), Some(EventKind::CodeWarning));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut log = EventLog::new();
        for i in 0..250 {
            log.append(EventKind::ThreatDetected, EventSeverity::Medium, format!("{i}"));
            assert!(log.len() <= 100);
        }
        assert_eq!(log.len(), 100);
    }

    #[test]
    fn test_101st_append_evicts_oldest() {
        let mut log = EventLog::new();
        for i in 1..=100 {
            log.append(EventKind::ManualScan, EventSeverity::Info, format!("e{i}"));
        }
        log.append(EventKind::ManualScan, EventSeverity::Info, "e101");

        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids.len(), 100);
        assert_eq!(ids.first(), Some(&101));
        assert_eq!(ids.last(), Some(&2));
        assert!(ids.windows(2).all(|w| w[0] == w[1] + 1));
    }

    #[test]
    fn test_clear_keeps_ids_monotonic() {
        let mut log = EventLog::with_capacity(5);
        log.append(EventKind::ManualScan, EventSeverity::Info, "a");
        log.append(EventKind::ManualScan, EventSeverity::Info, "b");
        log.clear();
        assert!(log.is_empty());

        let id = log.append(EventKind::ManualScan, EventSeverity::Info, "c");
        assert_eq!(id, 3);
    }

    #[test]
    fn test_default_source() {
        let mut log = EventLog::new();
        log.append(EventKind::AuthSuccess, EventSeverity::Info, "ok");
        log.append_from("editor", EventKind::ManualScan, EventSeverity::Info, "scan");

        let sources: Vec<_> = log.entries().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["editor", "security_system"]);
    }

    #[test]
    fn test_event_serialization() {
        let mut log = EventLog::new();
        log.append(EventKind::CodeBlocked, EventSeverity::High, "blocked");
        let json = serde_json::to_value(log.latest().unwrap()).unwrap();
        assert_eq!(json["type"], "code_blocked");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["source"], "security_system");
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut log = EventLog::with_capacity(0);
        log.append(EventKind::ManualScan, EventSeverity::Info, "a");
        log.append(EventKind::ManualScan, EventSeverity::Info, "b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 1);
    }
}

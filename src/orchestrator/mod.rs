//! Security orchestrator
//!
//! Composes the challenge gate, the threat scanner and the event log behind
//! one activation switch. Each orchestrator owns its own counters and log, so
//! independent instances never share state.
//!
//! Timed work (scan delivery, the lockout countdown and the threat monitor)
//! runs on tokio tasks that only hold a weak reference to the shared state.
//! Dropping the orchestrator drops the state, which aborts every task.

mod monitor;
mod status;

pub use monitor::{RandomProbe, ThreatProbe};
pub use status::{ComponentHealth, SecurityNotification, SecurityStatus};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::auth::{AuthChallengeController, AuthOutcome};
use crate::config::{Config, SecurityLevel};
use crate::error::{AccessError, ConfigError};
use crate::events::{EventKind, EventLog, EventSeverity, SecurityEvent};
use crate::rules::{ScanOutcome, ScanResult, ThreatScanner};
use crate::tasks::TimedTask;
use crate::utils::language_detection::Language;
use crate::utils::timing::format_countdown;

const NOTIFICATION_BUFFER: usize = 64;
const LOCKOUT_TICK: Duration = Duration::from_secs(1);

/// Entry point for everything the dashboard does.
///
/// Every method that touches timers must be called from within a tokio
/// runtime.
pub struct SecurityOrchestrator {
    shared: Arc<Mutex<Inner>>,
    notifications: broadcast::Sender<SecurityNotification>,
}

struct Inner {
    config: Config,
    active: bool,
    auth: AuthChallengeController,
    scanner: ThreatScanner,
    log: EventLog,
    active_threats: u64,
    last_scan_at: Option<DateTime<Utc>>,
    last_result: Option<ScanResult>,
    scan_generation: u64,
    components: ComponentHealth,
    probe: Box<dyn ThreatProbe>,
    notifications: broadcast::Sender<SecurityNotification>,
    scan_task: TimedTask,
    lockout_task: TimedTask,
    monitor_task: TimedTask,
}

impl SecurityOrchestrator {
    /// Create an inactive orchestrator with a random threat probe
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let probe = RandomProbe::new(config.monitor.threat_probability);
        Self::with_probe(config, Box::new(probe))
    }

    /// Create an inactive orchestrator with a custom threat probe
    pub fn with_probe(config: Config, probe: Box<dyn ThreatProbe>) -> Result<Self, ConfigError> {
        config.validate()?;

        let (notifications, _) = broadcast::channel(NOTIFICATION_BUFFER);
        let inner = Inner {
            auth: AuthChallengeController::new(&config.auth, config.default_level),
            log: EventLog::with_capacity(config.events.capacity),
            config,
            active: false,
            scanner: ThreatScanner::new(),
            active_threats: 0,
            last_scan_at: None,
            last_result: None,
            scan_generation: 0,
            components: ComponentHealth::default(),
            probe,
            notifications: notifications.clone(),
            scan_task: TimedTask::idle(),
            lockout_task: TimedTask::idle(),
            monitor_task: TimedTask::idle(),
        };

        Ok(Self {
            shared: Arc::new(Mutex::new(inner)),
            notifications,
        })
    }

    /// Receive notifications published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SecurityNotification> {
        self.notifications.subscribe()
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock().active
    }

    pub fn is_authenticated(&self) -> bool {
        let inner = self.shared.lock();
        inner.active && inner.auth.session().is_authenticated()
    }

    /// Switch the whole subsystem on or off.
    ///
    /// Turning it off cancels pending scans, the lockout countdown and the
    /// monitor, and discards all challenge progress. The log and the threat
    /// counter are kept. Setting the current state again does nothing.
    pub fn set_active(&self, active: bool) {
        let mut inner = self.shared.lock();
        if inner.active == active {
            return;
        }

        if active {
            inner.active = true;
            inner.auth.reset();
            inner.record(
                EventKind::SystemActivated,
                EventSeverity::Info,
                "Security system activated",
            );
            if inner.config.monitor.enabled {
                let period = Duration::from_secs(inner.config.monitor.interval_secs);
                inner.monitor_task =
                    TimedTask::every(period, monitor_ticker(Arc::downgrade(&self.shared)));
            }
            inner.notify(SecurityNotification::Activated);
            info!("Security system activated");
        } else {
            inner.active = false;
            inner.scan_generation += 1;
            inner.scan_task.cancel();
            inner.lockout_task.cancel();
            inner.monitor_task.cancel();
            inner.auth.reset();
            inner.record(
                EventKind::SystemDeactivated,
                EventSeverity::Medium,
                "Security system deactivated",
            );
            inner.notify(SecurityNotification::Deactivated);
            info!("Security system deactivated");
        }
    }

    /// Answer a challenge step
    pub fn submit_auth(&self, step: u8, value: &str) -> Result<AuthOutcome, AccessError> {
        let mut inner = self.shared.lock();
        inner.require_active()?;

        let outcome = inner.auth.submit(step, value);
        match outcome {
            AuthOutcome::Granted => inner.record(
                EventKind::AuthSuccess,
                EventSeverity::Info,
                "Security authentication successful",
            ),
            AuthOutcome::NextStep { step: next } => {
                let message = format!(
                    "Authentication step {} of {} passed",
                    next - 1,
                    inner.auth.level().step_count()
                );
                inner.record(EventKind::AuthStepPassed, EventSeverity::Info, message);
            }
            AuthOutcome::Denied { attempts_remaining } => inner.record(
                EventKind::AuthFailure,
                EventSeverity::Medium,
                format!("Authentication failed: {attempts_remaining} attempts remaining"),
            ),
            AuthOutcome::Locked { remaining_secs } => {
                inner.record(
                    EventKind::AuthLockout,
                    EventSeverity::High,
                    format!(
                        "Too many failed attempts. Locked for {}",
                        format_countdown(remaining_secs)
                    ),
                );
                inner.lockout_task =
                    TimedTask::every(LOCKOUT_TICK, lockout_ticker(Arc::downgrade(&self.shared)));
            }
            _ => {}
        }
        inner.notify(SecurityNotification::Auth { outcome });

        Ok(outcome)
    }

    /// Submit code for scanning and return its generation.
    ///
    /// The verdict is computed immediately but only delivered after the
    /// configured latency. A newer submission, or deactivation, supersedes a
    /// pending one, whose result is then discarded.
    pub fn submit_code(&self, code: &str, language: &Language) -> Result<u64, AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;

        inner.scan_task.cancel();
        inner.scan_generation += 1;
        let generation = inner.scan_generation;

        let result = inner.scanner.scan(code, language);
        let latency = Duration::from_millis(inner.config.scan.latency_ms);
        let weak = Arc::downgrade(&self.shared);
        inner.scan_task = TimedTask::after(latency, move || deliver_scan(&weak, generation, result));

        debug!(generation, latency_ms = latency.as_millis() as u64, "Scan scheduled");
        Ok(generation)
    }

    /// Switch level; requires the dashboard
    pub fn set_level(&self, level: SecurityLevel) -> Result<(), AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;
        inner.change_level(level);
        Ok(())
    }

    /// Advance to the next level, wrapping after maximum
    pub fn cycle_level(&self) -> Result<SecurityLevel, AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;
        let level = inner.auth.level().next();
        inner.change_level(level);
        Ok(level)
    }

    pub fn clear_threats(&self) -> Result<(), AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;
        inner.active_threats = 0;
        Ok(())
    }

    pub fn clear_log(&self) -> Result<(), AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;
        inner.log.clear();
        Ok(())
    }

    pub fn trigger_manual_scan_event(&self) -> Result<(), AccessError> {
        let mut inner = self.shared.lock();
        inner.require_dashboard()?;
        inner.record(
            EventKind::ManualScan,
            EventSeverity::Info,
            "Manual security scan initiated",
        );
        Ok(())
    }

    /// Run one monitor tick now; returns whether a threat was reported
    pub fn monitor_tick(&self) -> bool {
        self.shared.lock().monitor_tick()
    }

    /// Snapshot of counters, session and log
    pub fn status(&self) -> SecurityStatus {
        let inner = self.shared.lock();
        SecurityStatus {
            active: inner.active,
            authenticated: inner.active && inner.auth.session().is_authenticated(),
            level: inner.auth.level(),
            auth: *inner.auth.session(),
            active_threats: inner.active_threats,
            last_scan_at: inner.last_scan_at,
            last_result: inner.last_result.clone(),
            scanning: inner.scan_task.is_pending(),
            components: inner.components,
            events: inner.log.snapshot(),
        }
    }

    /// Events, newest first
    pub fn events(&self) -> Vec<SecurityEvent> {
        self.shared.lock().log.snapshot()
    }
}

impl Inner {
    fn require_active(&self) -> Result<(), AccessError> {
        if self.active {
            Ok(())
        } else {
            Err(AccessError::Inactive)
        }
    }

    fn require_dashboard(&self) -> Result<(), AccessError> {
        self.require_active()?;
        if self.auth.session().is_authenticated() {
            Ok(())
        } else {
            Err(AccessError::NotAuthenticated)
        }
    }

    fn record(&mut self, kind: EventKind, severity: EventSeverity, message: impl Into<String>) {
        self.log.append(kind, severity, message);
    }

    fn notify(&self, notification: SecurityNotification) {
        // No subscribers is not an error.
        let _ = self.notifications.send(notification);
    }

    fn change_level(&mut self, level: SecurityLevel) {
        self.auth.set_level(level);
        self.record(
            EventKind::SecurityLevelChanged,
            EventSeverity::Info,
            format!("Security level changed to {level}"),
        );
        self.notify(SecurityNotification::LevelChanged { level });
        info!(%level, "Security level changed");
    }

    fn apply_scan(&mut self, generation: u64, result: ScanResult) {
        if !self.active || generation != self.scan_generation {
            debug!(generation, current = self.scan_generation, "Discarding stale scan");
            return;
        }

        self.last_scan_at = Some(Utc::now());
        match result.outcome() {
            ScanOutcome::Blocked => {
                let critical = result.critical_count();
                self.active_threats += critical as u64;
                self.record(
                    EventKind::CodeBlocked,
                    EventSeverity::High,
                    format!("Code execution blocked: {critical} critical violations"),
                );
                info!(generation, critical, "Code execution blocked");
            }
            ScanOutcome::Warning => {
                let count = result.violations().len();
                self.record(
                    EventKind::CodeWarning,
                    EventSeverity::Medium,
                    format!("Code warnings: {count} security concerns"),
                );
            }
            ScanOutcome::Validated => self.record(
                EventKind::CodeValidated,
                EventSeverity::Info,
                "Code passed security validation",
            ),
        }

        self.notify(SecurityNotification::ScanCompleted {
            generation,
            valid: result.is_valid(),
            score: result.score(),
            violations: result.violations().to_vec(),
        });
        self.last_result = Some(result);
    }

    fn monitor_tick(&mut self) -> bool {
        if !self.active || !self.probe.detect() {
            return false;
        }

        self.active_threats += 1;
        self.record(
            EventKind::ThreatDetected,
            EventSeverity::Medium,
            "Potential security threat blocked",
        );
        self.notify(SecurityNotification::ThreatDetected {
            active_threats: self.active_threats,
        });
        debug!(active_threats = self.active_threats, "Simulated threat blocked");
        true
    }

    fn lockout_tick(&mut self) -> ControlFlow<()> {
        let outcome = self.auth.tick();
        match outcome {
            AuthOutcome::Countdown { remaining_secs } => {
                self.notify(SecurityNotification::LockoutTick { remaining_secs });
                ControlFlow::Continue(())
            }
            AuthOutcome::Unlocked => {
                self.record(
                    EventKind::LockoutCleared,
                    EventSeverity::Info,
                    "Lockout expired, authentication re-enabled",
                );
                self.notify(SecurityNotification::LockoutTick { remaining_secs: 0 });
                self.notify(SecurityNotification::Auth { outcome });
                ControlFlow::Break(())
            }
            _ => ControlFlow::Break(()),
        }
    }
}

fn deliver_scan(shared: &Weak<Mutex<Inner>>, generation: u64, result: ScanResult) {
    if let Some(shared) = shared.upgrade() {
        shared.lock().apply_scan(generation, result);
    }
}

fn lockout_ticker(shared: Weak<Mutex<Inner>>) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
    move || match shared.upgrade() {
        Some(shared) => {
            let flow = shared.lock().lockout_tick();
            flow
        }
        None => ControlFlow::Break(()),
    }
}

fn monitor_ticker(shared: Weak<Mutex<Inner>>) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
    move || match shared.upgrade() {
        Some(shared) => {
            shared.lock().monitor_tick();
            ControlFlow::Continue(())
        }
        None => ControlFlow::Break(()),
    }
}

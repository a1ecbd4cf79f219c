//! Progressive challenge state machine
//!
//! The controller is a pure finite-state machine: [`AuthChallengeController::transition`]
//! maps `(session, input)` to `(session, outcome)` without side effects. The
//! mutating wrappers [`submit`](AuthChallengeController::submit) and
//! [`tick`](AuthChallengeController::tick) apply it to the owned session.
//!
//! Failed attempts are counted across the whole session, not per step.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::factors::FactorKind;
use crate::config::{AuthConfig, FactorsConfig, SecurityLevel};

/// Where the challenge currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    /// Waiting for the answer to a 1-based step
    AwaitingStep { step: u8 },
    /// Input is refused until the countdown reaches zero
    Locked { remaining_secs: u32 },
    /// Terminal success
    Authenticated,
}

/// Mutable part of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub level: SecurityLevel,
    pub state: AuthState,
    pub failed_attempts: u8,
}

impl AuthSession {
    /// Fresh session at step 1 with no failed attempts
    pub fn new(level: SecurityLevel) -> Self {
        Self {
            level,
            state: AuthState::AwaitingStep { step: 1 },
            failed_attempts: 0,
        }
    }

    pub fn current_step(&self) -> Option<u8> {
        match self.state {
            AuthState::AwaitingStep { step } => Some(step),
            _ => None,
        }
    }

    /// Factor expected next, if the session is waiting for input
    pub fn current_factor(&self) -> Option<FactorKind> {
        self.current_step().and_then(FactorKind::for_step)
    }

    pub fn lockout_remaining(&self) -> u32 {
        match self.state {
            AuthState::Locked { remaining_secs } => remaining_secs,
            _ => 0,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, AuthState::Locked { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }
}

/// Input accepted by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthInput<'a> {
    /// An answer, tagged with the step it is meant for
    Submit { step: u8, value: &'a str },
    /// One second of lockout countdown
    Tick,
}

/// What a transition reports upward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthOutcome {
    /// The last step was answered correctly
    Granted,
    /// A step was answered correctly and another one follows
    NextStep { step: u8 },
    /// Wrong answer; the session stays on the same step
    Denied { attempts_remaining: u8 },
    /// Wrong answer that exhausted the attempts; a lockout started
    Locked { remaining_secs: u32 },
    /// Input refused because a lockout is running
    StillLocked { remaining_secs: u32 },
    /// Countdown advanced but has not elapsed
    Countdown { remaining_secs: u32 },
    /// Countdown elapsed; the session is back at step 1
    Unlocked,
    /// Input after success is ignored
    AlreadyAuthenticated,
    /// Tick outside of a lockout
    Idle,
}

impl AuthOutcome {
    /// Attempts left before a lockout, when the outcome is a denial
    pub fn attempts_remaining(&self) -> Option<u8> {
        match self {
            Self::Denied { attempts_remaining } => Some(*attempts_remaining),
            Self::Locked { .. } => Some(0),
            _ => None,
        }
    }
}

/// Gate that walks a user through the factors of a security level
#[derive(Debug, Clone)]
pub struct AuthChallengeController {
    factors: FactorsConfig,
    max_attempts: u8,
    lockout_secs: u32,
    session: AuthSession,
}

impl AuthChallengeController {
    pub fn new(config: &AuthConfig, level: SecurityLevel) -> Self {
        Self {
            factors: config.factors.clone(),
            max_attempts: config.max_attempts.max(1),
            lockout_secs: config.lockout_secs.max(1),
            session: AuthSession::new(level),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn level(&self) -> SecurityLevel {
        self.session.level
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    pub fn lockout_secs(&self) -> u32 {
        self.lockout_secs
    }

    /// Pure transition function
    pub fn transition(&self, session: &AuthSession, input: AuthInput<'_>) -> (AuthSession, AuthOutcome) {
        let mut next = *session;

        let outcome = match (session.state, input) {
            (AuthState::AwaitingStep { step }, AuthInput::Submit { step: answered, value }) => {
                if answered == step && self.is_expected(session.level, step, value) {
                    if step >= session.level.step_count() {
                        next.state = AuthState::Authenticated;
                        next.failed_attempts = 0;
                        AuthOutcome::Granted
                    } else {
                        let step = step + 1;
                        next.state = AuthState::AwaitingStep { step };
                        AuthOutcome::NextStep { step }
                    }
                } else {
                    next.failed_attempts = session.failed_attempts.saturating_add(1);
                    if next.failed_attempts >= self.max_attempts {
                        next.state = AuthState::Locked {
                            remaining_secs: self.lockout_secs,
                        };
                        AuthOutcome::Locked {
                            remaining_secs: self.lockout_secs,
                        }
                    } else {
                        AuthOutcome::Denied {
                            attempts_remaining: self.max_attempts - next.failed_attempts,
                        }
                    }
                }
            }
            (AuthState::Locked { remaining_secs }, AuthInput::Submit { .. }) => {
                AuthOutcome::StillLocked { remaining_secs }
            }
            (AuthState::Locked { remaining_secs }, AuthInput::Tick) => {
                let remaining_secs = remaining_secs.saturating_sub(1);
                if remaining_secs == 0 {
                    next = AuthSession::new(session.level);
                    AuthOutcome::Unlocked
                } else {
                    next.state = AuthState::Locked { remaining_secs };
                    AuthOutcome::Countdown { remaining_secs }
                }
            }
            (AuthState::Authenticated, AuthInput::Submit { .. }) => AuthOutcome::AlreadyAuthenticated,
            (_, AuthInput::Tick) => AuthOutcome::Idle,
        };

        (next, outcome)
    }

    /// Answer the given step
    pub fn submit(&mut self, step: u8, value: &str) -> AuthOutcome {
        let (session, outcome) = self.transition(&self.session, AuthInput::Submit { step, value });
        self.session = session;

        match outcome {
            AuthOutcome::Granted => info!(level = %session.level, "Challenge passed"),
            AuthOutcome::NextStep { step, .. } => debug!(step, "Step passed"),
            AuthOutcome::Denied { attempts_remaining } => {
                info!(step, attempts_remaining, "Challenge answer rejected")
            }
            AuthOutcome::Locked { remaining_secs } => {
                warn!(remaining_secs, "Too many failed attempts, locking")
            }
            _ => debug!(?outcome, "Input ignored"),
        }

        outcome
    }

    /// Advance the lockout countdown by one second
    pub fn tick(&mut self) -> AuthOutcome {
        let (session, outcome) = self.transition(&self.session, AuthInput::Tick);
        self.session = session;
        if outcome == AuthOutcome::Unlocked {
            info!("Lockout elapsed");
        }
        outcome
    }

    /// Discard all progress, including a running lockout
    pub fn reset(&mut self) {
        self.session = AuthSession::new(self.session.level);
    }

    /// Switch level.
    ///
    /// A session waiting for input restarts at step 1 under the new level but
    /// keeps its failed attempts; a lockout or a completed challenge is kept.
    pub fn set_level(&mut self, level: SecurityLevel) {
        self.session.level = level;
        if let AuthState::AwaitingStep { .. } = self.session.state {
            self.session.state = AuthState::AwaitingStep { step: 1 };
        }
    }

    fn is_expected(&self, level: SecurityLevel, step: u8, value: &str) -> bool {
        match FactorKind::for_step(step) {
            Some(factor) => {
                let expected = self.factors.expected(level, factor);
                !expected.is_empty() && value == expected
            }
            None => false,
        }
    }
}

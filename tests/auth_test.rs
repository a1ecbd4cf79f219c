//! Integration tests for the challenge gate

use ideguard::auth::{AuthChallengeController, AuthInput, AuthOutcome, AuthSession, AuthState};
use ideguard::config::{Config, SecurityLevel};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn controller(level: SecurityLevel) -> AuthChallengeController {
    AuthChallengeController::new(&Config::default().auth, level)
}

#[test]
fn test_maximum_requires_three_codes_in_order() {
    let mut c = controller(SecurityLevel::Maximum);

    assert_eq!(
        c.submit(1, "OCTOPUS-MAXIMUM-SECURITY-2025"),
        AuthOutcome::NextStep { step: 2 }
    );
    assert_eq!(c.submit(2, "BIOMETRIC-AUTH-001"), AuthOutcome::NextStep { step: 3 });
    assert_eq!(c.submit(3, "2FA-MAXIMUM-001"), AuthOutcome::Granted);
    assert!(c.session().is_authenticated());
}

#[test]
fn test_codes_are_level_specific() {
    let mut c = controller(SecurityLevel::Enhanced);
    // The basic knowledge code does not open the enhanced gate
    assert_eq!(
        c.submit(1, "SECURE2025"),
        AuthOutcome::Denied {
            attempts_remaining: 2
        }
    );
}

#[test]
fn test_three_mixed_failures_lock_for_five_minutes() {
    let mut c = controller(SecurityLevel::Maximum);

    c.submit(1, "guess");
    c.submit(1, "OCTOPUS-MAXIMUM-SECURITY-2025");
    c.submit(2, "guess");
    let outcome = c.submit(2, "guess again");

    assert_eq!(outcome, AuthOutcome::Locked { remaining_secs: 300 });
    assert_eq!(outcome.attempts_remaining(), Some(0));
    assert_eq!(c.session().lockout_remaining(), 300);
}

#[test]
fn test_lockout_elapses_after_exactly_300_ticks() {
    let mut c = controller(SecurityLevel::Basic);
    for _ in 0..3 {
        c.submit(1, "");
    }

    for _ in 0..299 {
        assert!(matches!(c.tick(), AuthOutcome::Countdown { .. }));
    }
    assert!(c.session().is_locked());

    assert_eq!(c.tick(), AuthOutcome::Unlocked);
    assert_eq!(*c.session(), AuthSession::new(SecurityLevel::Basic));
    assert_eq!(c.submit(1, "SECURE2025"), AuthOutcome::Granted);
}

#[test]
fn test_pure_transition_walkthrough() {
    let c = controller(SecurityLevel::Enhanced);
    let start = AuthSession::new(SecurityLevel::Enhanced);

    let (after_first, outcome) = c.transition(
        &start,
        AuthInput::Submit {
            step: 1,
            value: "DEEPBLUE-SECURITY-001",
        },
    );
    assert_eq!(outcome, AuthOutcome::NextStep { step: 2 });
    assert_eq!(after_first.state, AuthState::AwaitingStep { step: 2 });

    let (done, outcome) = c.transition(
        &after_first,
        AuthInput::Submit {
            step: 2,
            value: "987654",
        },
    );
    assert_eq!(outcome, AuthOutcome::Granted);
    assert_eq!(done.state, AuthState::Authenticated);

    // The controller's own session was never touched
    assert_eq!(*c.session(), start);
}

#[test]
fn test_codes_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ideguard.toml");
    fs::write(
        &path,
        r#"
default_level = "basic"

[auth]
max_attempts = 5

[auth.factors.knowledge]
basic = "open-sesame"
enhanced = "open-sesame-2"
maximum = "open-sesame-3"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.default_level, SecurityLevel::Basic);

    let mut c = AuthChallengeController::new(&config.auth, config.default_level);
    assert_eq!(c.max_attempts(), 5);
    assert_eq!(
        c.submit(1, "SECURE2025"),
        AuthOutcome::Denied {
            attempts_remaining: 4
        }
    );
    assert_eq!(c.submit(1, "open-sesame"), AuthOutcome::Granted);
}

#[test]
fn test_partial_factor_table_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ideguard.toml");
    fs::write(&path, "[auth.factors.knowledge]\nbasic = \"only-basic\"\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("requires a knowledge code"));
}

#[test]
fn test_session_serialization() {
    let mut c = controller(SecurityLevel::Basic);
    for _ in 0..3 {
        c.submit(1, "bad");
    }

    let json = serde_json::to_value(c.session()).unwrap();
    assert_eq!(json["level"], "basic");
    assert_eq!(json["state"]["state"], "locked");
    assert_eq!(json["state"]["remaining_secs"], 300);
    assert_eq!(json["failed_attempts"], 3);
}

//! Auth module - Multi-factor challenge gate with attempt limiting and lockout

pub mod controller;
pub mod factors;

pub use controller::{AuthChallengeController, AuthInput, AuthOutcome, AuthSession, AuthState};
pub use factors::FactorKind;

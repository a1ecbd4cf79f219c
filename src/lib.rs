//! ideguard Library
//!
//! Security core for an editor sandbox: a rule-based threat scanner that
//! scores submitted source text, a progressive multi-factor challenge with
//! attempt limiting and timed lockout, and an orchestrator tying both to a
//! bounded security event log.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod rules;
pub mod scanner;
pub mod tasks;
pub mod utils;

pub use error::GuardError;
pub use orchestrator::SecurityOrchestrator;
pub use rules::ThreatScanner;
pub use cli::exit_codes;

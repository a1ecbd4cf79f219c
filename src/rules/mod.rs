//! Rules module - Threat rule catalog and scanning engine

pub mod categories;
pub mod engine;
pub mod patterns;
pub mod results;

pub use engine::ThreatScanner;
pub use results::{ScanOutcome, ScanResult, Severity, Violation, ViolationType};

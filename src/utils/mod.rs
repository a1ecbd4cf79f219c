//! Utility modules for ideguard

pub mod language_detection;
pub mod timing;

pub use language_detection::Language;
pub use timing::{format_countdown, format_duration, Timer};

//! Exit codes for the CLI
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Every source validated |
//! | 1 | `CRITICAL_ISSUES` | Blocked | A source has a critical violation |
//! | 2 | `WARNINGS` | Warnings | Violations found, none critical |
//! | 3 | `ERROR` | Runtime error | Unreadable file, invalid configuration |
//! | 4 | `INVALID_ARGS` | Invalid arguments | Unknown security level |

/// Success - nothing matched, or the command completed normally.
pub const SUCCESS: i32 = 0;

/// At least one scanned source would be blocked.
pub const CRITICAL_ISSUES: i32 = 1;

/// Violations were found but none is critical.
pub const WARNINGS: i32 = 2;

/// Runtime error (file not found, invalid configuration, failed prompt).
pub const ERROR: i32 = 3;

/// Invalid arguments (unknown security level).
pub const INVALID_ARGS: i32 = 4;

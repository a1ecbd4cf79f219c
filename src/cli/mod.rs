//! # CLI Module
//!
//! This module defines the command-line interface for ideguard using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Scan files, directories or stdin for unsafe code |
//! | `session` | Interactive security session with the challenge gate |
//! | `init` | Initialize a new configuration file |
//! | `levels` | List security levels and the factors they require |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `--log-json` - Emit logs as JSON lines on stderr
//!
//! ## Examples
//!
//! ```bash
//! # Scan a project
//! ideguard scan src/
//!
//! # Scan a snippet from stdin as Python, as SARIF
//! cat snippet.py | ideguard scan - --language python --format sarif
//!
//! # Start an interactive session at maximum level
//! ideguard session --level maximum
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{GenerateManArgs, InitArgs, LevelsArgs, ScanArgs, SessionArgs};

/// ideguard - Code-safety scanner and multi-factor challenge gate
#[derive(Parser, Debug)]
#[command(name = "ideguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan source files for malicious or restricted code
    Scan(ScanArgs),

    /// Start an interactive security session
    Session(SessionArgs),

    /// Initialize a new configuration file
    Init(InitArgs),

    /// List security levels
    Levels(LevelsArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}

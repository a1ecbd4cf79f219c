//! CLI commands module

pub mod generate_man;
pub mod init;
pub mod levels;
pub mod scan;
pub mod session;

use clap::Args;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files or directories to scan (`-` reads standard input)
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Language of every source (javascript, python, php, ...); inferred from the extension by default
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Output format (terminal, json, sarif)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the session command
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Security level to start at (basic, enhanced, maximum)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Default security level (basic, enhanced, maximum)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Skip interactive prompts
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the levels command
#[derive(Args, Debug)]
pub struct LevelsArgs {}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

/// Output format for the scan command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Sarif,
}

//! ideguard - Code-safety scanner and multi-factor challenge gate
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ideguard::cli::{commands, Cli, Commands};
use ideguard::exit_codes;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.log_json);

    let config_path = cli.config.as_deref();
    let result: anyhow::Result<i32> = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args).await.map_err(Into::into),
        Commands::Session(args) => commands::session::execute(args, config_path).await,
        Commands::Init(args) => commands::init::execute(args).await,
        Commands::Levels(args) => commands::levels::execute(args, config_path)
            .await
            .map_err(Into::into),
        Commands::GenerateMan(args) => commands::generate_man::execute(args)
            .await
            .map_err(Into::into),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so rendered reports on stdout stay parseable.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

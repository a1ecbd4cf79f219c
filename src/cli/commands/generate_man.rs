//! Generate man page command

use crate::cli::Cli;
use crate::error::{ConfigError, GuardError};
use crate::exit_codes;
use clap::CommandFactory;
use std::fs;

use super::GenerateManArgs;

/// Execute the generate-man command
pub async fn execute(args: GenerateManArgs) -> Result<i32, GuardError> {
    let man = clap_mangen::Man::new(Cli::command());
    let output_path = args.output.join("ideguard.1");

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).map_err(|e| {
        GuardError::Config(ConfigError::Serialize {
            message: format!("Failed to generate man page: {}", e),
        })
    })?;

    fs::write(&output_path, buffer).map_err(|e| GuardError::FileWrite {
        path: output_path.display().to_string(),
        source: e,
    })?;

    println!("Man page generated: {}", output_path.display());

    Ok(exit_codes::SUCCESS)
}

//! Init command - Initialize a new configuration file

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Select};
use std::fs;
use std::path::Path;

use super::InitArgs;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::{Config, SecurityLevel};
use crate::exit_codes;

pub async fn execute(args: InitArgs) -> Result<i32> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        if args.non_interactive {
            eprintln!(
                "{} Configuration file already exists. Use --force to overwrite.",
                "Error:".red().bold()
            );
            return Ok(exit_codes::ERROR);
        }

        let overwrite = Confirm::new()
            .with_prompt("Configuration file already exists. Overwrite?")
            .default(false)
            .interact()?;

        if !overwrite {
            println!("{}", "Aborted.".yellow());
            return Ok(exit_codes::SUCCESS);
        }
    }

    let level = if let Some(name) = args.level {
        match SecurityLevel::from_name(&name) {
            Some(level) => level,
            None => {
                eprintln!(
                    "{} Unknown security level '{}'. Expected basic, enhanced or maximum.",
                    "Error:".red().bold(),
                    name
                );
                return Ok(exit_codes::INVALID_ARGS);
            }
        }
    } else if args.non_interactive {
        SecurityLevel::default()
    } else {
        select_level()?
    };

    let config = Config::with_level(level);
    let content = config.to_toml()?;
    fs::write(config_path, &content).context("Failed to write configuration file")?;

    println!(
        "{} Created {} with default level '{}'",
        "Success:".green().bold(),
        CONFIG_FILENAME.cyan(),
        level.name().yellow()
    );

    println!("\nNext steps:");
    println!("  1. Replace the factor codes in {}", CONFIG_FILENAME.cyan());
    println!("  2. Run {} to scan your sources", "ideguard scan .".cyan());
    println!("  3. Run {} to open a session", "ideguard session".cyan());

    Ok(exit_codes::SUCCESS)
}

fn select_level() -> Result<SecurityLevel> {
    let items: Vec<String> = SecurityLevel::ALL
        .iter()
        .map(|l| format!("{} - {}", l.name(), l.description()))
        .collect();

    let default = SecurityLevel::ALL
        .iter()
        .position(|l| *l == SecurityLevel::default())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Select the default security level")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(SecurityLevel::ALL
        .get(selection)
        .copied()
        .unwrap_or_default())
}

//! Session command - Interactive security session
//!
//! Activates an orchestrator, walks the user through the challenge and then
//! offers the dashboard menu until the system is disabled.

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast::{error::RecvError, Receiver};

use super::SessionArgs;
use crate::auth::{AuthOutcome, FactorKind};
use crate::cli::output::TerminalOutput;
use crate::config::{Config, SecurityLevel};
use crate::exit_codes;
use crate::orchestrator::{SecurityNotification, SecurityOrchestrator};
use crate::scanner;
use crate::utils::timing::format_countdown;

const EVENTS_SHOWN: usize = 20;

const MENU: [&str; 8] = [
    "Scan a file",
    "Cycle security level",
    "Clear active threats",
    "Clear event log",
    "Log manual security scan",
    "Show status",
    "Show event log",
    "Disable security system",
];

pub async fn execute(args: SessionArgs, config_path: Option<&Path>) -> Result<i32> {
    if !Term::stdout().is_term() {
        eprintln!(
            "{} The session command needs an interactive terminal. Use 'ideguard scan' instead.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::ERROR);
    }

    let mut config = Config::load(config_path)?;
    if let Some(name) = &args.level {
        match SecurityLevel::from_name(name) {
            Some(level) => config.default_level = level,
            None => {
                eprintln!(
                    "{} Unknown security level '{}'. Expected basic, enhanced or maximum.",
                    "Error:".red().bold(),
                    name
                );
                return Ok(exit_codes::INVALID_ARGS);
            }
        }
    }

    let orchestrator = SecurityOrchestrator::new(config).context("Invalid configuration")?;
    let mut notifications = orchestrator.subscribe();
    orchestrator.set_active(true);

    println!(
        "\n{} v{}  {} {}\n",
        "ideguard".cyan().bold(),
        env!("CARGO_PKG_VERSION"),
        "Level:".dimmed(),
        orchestrator.status().level.name().yellow()
    );

    authenticate(&orchestrator, &mut notifications).await?;
    dashboard(&orchestrator, &mut notifications).await
}

async fn authenticate(
    orchestrator: &SecurityOrchestrator,
    notifications: &mut Receiver<SecurityNotification>,
) -> Result<()> {
    loop {
        let status = orchestrator.status();
        if status.authenticated {
            return Ok(());
        }

        if status.auth.is_locked() {
            wait_for_unlock(orchestrator, notifications, status.auth.lockout_remaining()).await;
            continue;
        }

        let step = status.auth.current_step().unwrap_or(1);
        let factor = status.auth.current_factor().unwrap_or(FactorKind::Knowledge);
        let label = format!("[{}/{}] {}", step, status.level.step_count(), factor.label());

        let value = prompt(move || Password::new().with_prompt(label).interact())?;
        let outcome = orchestrator.submit_auth(step, &value)?;
        report_auth(outcome);
    }
}

fn report_auth(outcome: AuthOutcome) {
    match outcome {
        AuthOutcome::Granted => println!("{}\n", "✅ Access granted".green().bold()),
        AuthOutcome::NextStep { step } => {
            println!("{} Continue with step {}", "✓".green(), step)
        }
        AuthOutcome::Denied { attempts_remaining } => println!(
            "{} Invalid code. {} attempt(s) remaining.",
            "✗".red(),
            attempts_remaining
        ),
        AuthOutcome::Locked { remaining_secs } => println!(
            "{} Too many failed attempts. Locked for {}.",
            "🔒".red(),
            format_countdown(remaining_secs)
        ),
        _ => {}
    }
}

async fn wait_for_unlock(
    orchestrator: &SecurityOrchestrator,
    notifications: &mut Receiver<SecurityNotification>,
    remaining_secs: u32,
) {
    let spinner = spinner(locked_message(remaining_secs));

    loop {
        match notifications.recv().await {
            Ok(SecurityNotification::LockoutTick { remaining_secs }) => {
                spinner.set_message(locked_message(remaining_secs));
            }
            Ok(SecurityNotification::Auth {
                outcome: AuthOutcome::Unlocked,
            })
            | Err(RecvError::Closed) => break,
            Ok(_) | Err(RecvError::Lagged(_)) => {}
        }

        if !orchestrator.status().auth.is_locked() {
            break;
        }
    }

    spinner.finish_and_clear();
    println!("{} Lockout expired. Try again.", "🔓".green());
}

fn locked_message(remaining_secs: u32) -> String {
    format!("Locked. Retry in {}", format_countdown(remaining_secs))
}

async fn dashboard(
    orchestrator: &SecurityOrchestrator,
    notifications: &mut Receiver<SecurityNotification>,
) -> Result<i32> {
    let output = TerminalOutput::new();

    loop {
        let choice = prompt(|| {
            Select::new()
                .with_prompt("Security dashboard")
                .items(&MENU)
                .default(0)
                .interact()
        })?;

        match choice {
            0 => scan_file(orchestrator, notifications, &output).await?,
            1 => {
                let level = orchestrator.cycle_level()?;
                println!("Security level changed to {}", level.name().yellow());
            }
            2 => {
                orchestrator.clear_threats()?;
                println!("{}", "Active threats cleared.".green());
            }
            3 => {
                orchestrator.clear_log()?;
                println!("{}", "Event log cleared.".green());
            }
            4 => {
                orchestrator.trigger_manual_scan_event()?;
                println!("Manual security scan initiated");
            }
            5 => print!("{}", output.format_status(&orchestrator.status())),
            6 => print!("{}", output.format_events(&orchestrator.events(), EVENTS_SHOWN)),
            _ => {
                orchestrator.set_active(false);
                println!("{}", "Security system disabled.".yellow());
                return Ok(exit_codes::SUCCESS);
            }
        }
    }
}

async fn scan_file(
    orchestrator: &SecurityOrchestrator,
    notifications: &mut Receiver<SecurityNotification>,
    output: &TerminalOutput,
) -> Result<()> {
    let path: String = prompt(|| Input::new().with_prompt("File to scan").interact_text())?;
    let source = match scanner::read_file(&PathBuf::from(path.trim()), None) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(());
        }
    };

    let generation = orchestrator.submit_code(&source.content, &source.language)?;
    let spinner = spinner(format!("Scanning {} [{}]", source.path, source.language));

    loop {
        match notifications.recv().await {
            Ok(SecurityNotification::ScanCompleted {
                generation: done, ..
            }) if done == generation => break,
            Err(RecvError::Closed) => break,
            Ok(_) | Err(RecvError::Lagged(_)) => {
                if !orchestrator.status().scanning {
                    break;
                }
            }
        }
    }
    spinner.finish_and_clear();

    match orchestrator.status().last_result {
        Some(result) => print!("{}", output.format_result(&result)),
        None => println!("{}", "Scan was cancelled.".yellow()),
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Run a blocking dialoguer prompt without stalling the runtime's timers
fn prompt<T>(f: impl FnOnce() -> dialoguer::Result<T>) -> Result<T> {
    tokio::task::block_in_place(f).context("Interactive prompt failed")
}

//! Levels command - List security levels and their factors

use colored::Colorize;
use std::path::Path;

use super::LevelsArgs;
use crate::config::{Config, SecurityLevel};
use crate::error::GuardError;
use crate::exit_codes;

pub async fn execute(_args: LevelsArgs, config_path: Option<&Path>) -> Result<i32, GuardError> {
    let config = Config::load(config_path)?;
    print!("{}", render(config.default_level));
    Ok(exit_codes::SUCCESS)
}

fn render(default_level: SecurityLevel) -> String {
    let mut output = format!("{}\n\n", "Security levels".bold());

    for level in SecurityLevel::ALL {
        let marker = if level == default_level {
            " (default)".green().to_string()
        } else {
            String::new()
        };

        output.push_str(&format!(
            "  {}{} - {}\n",
            level.name().yellow().bold(),
            marker,
            level.description()
        ));

        let factors: Vec<&str> = level.factors().iter().map(|f| f.label()).collect();
        output.push_str(&format!(
            "    {} step(s): {}\n",
            level.step_count(),
            factors.join(" → ").dimmed()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_level() {
        colored::control::set_override(false);
        let output = render(SecurityLevel::Enhanced);

        assert!(output.contains("basic - "));
        assert!(output.contains("enhanced (default)"));
        assert!(output.contains("3 step(s): Security code → Biometric code → Two-factor code"));
    }
}

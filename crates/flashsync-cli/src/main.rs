//! flashsync CLI
//!
//! Reads local cards and remote records as JSON and reports which cards need
//! to be created or updated.

mod cli;
mod commands;
mod error;
mod logging;

use std::io;

use clap::Parser;
use colored::Colorize;
use flashsync_cards::SyncSettings;
use flashsync_match::EquivalenceChecker;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let settings = load_settings(&cli)?;

    match cli.command {
        Some(cmd) => execute_command(cmd, settings),
        None => {
            println!("{} Flashcard sync checker", "flashsync".green().bold());
            println!();
            println!("Run {} for available commands.", "flashsync --help".cyan());
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> Result<SyncSettings> {
    match &cli.config {
        Some(path) => Ok(SyncSettings::load(path)?),
        None => Ok(SyncSettings::default()),
    }
}

fn execute_command(cmd: Commands, settings: SyncSettings) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match cmd {
        Commands::Check {
            local,
            remote,
            json,
        } => {
            let checker = EquivalenceChecker::new(settings)?;
            commands::run_check(&checker, &local, &remote, json, &mut stdout)
        }
        Commands::Payload { local, update } => {
            settings.validate()?;
            commands::run_payload(&settings, &local, update, &mut stdout)
        }
        Commands::Source { text, id } => {
            if text.is_empty() {
                return Err(CliError::user("Source text must not be empty"));
            }
            let checker = EquivalenceChecker::new(settings)?;
            commands::run_source(checker.normalizer(), &text, id, &mut stdout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_load_settings_defaults_without_config() {
        let cli = Cli {
            verbose: false,
            config: None,
            command: None,
        };
        assert_eq!(load_settings(&cli).unwrap(), SyncSettings::default());
    }
}

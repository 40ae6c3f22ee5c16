//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, UserCommands};
use crate::config::StaticConfig;
use crate::errors::LinklisterError;
use crate::services::{LinkService, UserService};
use crate::storage::StorageFactory;
use commands::{config_generate, list_links, user_add, user_list, user_remove};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinklisterError> for CliError {
    fn from(err: LinklisterError) -> Self {
        match err {
            LinklisterError::DatabaseConfig(_)
            | LinklisterError::DatabaseConnection(_)
            | LinklisterError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            LinklisterError::Validation(_) => CliError::ParseError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input. `Serve` is handled by the caller.
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generate doesn't need a DB connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let storage = StorageFactory::create(&config.database).await?;

    match cmd {
        Commands::User { action } => {
            let users = UserService::new(storage);
            match action {
                UserCommands::Add { username, password } => {
                    user_add(&users, username, password).await
                }
                UserCommands::List => user_list(&users).await,
                UserCommands::Remove { username } => user_remove(&users, username).await,
            }
        }

        Commands::Links { owner } => {
            let users = UserService::new(storage.clone());
            let links = LinkService::new(storage, config.links.prefix.clone());
            list_links(&links, &users, owner).await
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),

        Commands::Config { .. } => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            CliError::from(LinklisterError::database_connection("down")),
            CliError::StorageError(_)
        ));
        assert!(matches!(
            CliError::from(LinklisterError::validation("bad name")),
            CliError::ParseError(_)
        ));
        assert!(matches!(
            CliError::from(LinklisterError::protected("owns links")),
            CliError::CommandError(_)
        ));
    }
}

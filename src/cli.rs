//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Linklister - short paths for registered users, with usage logging
#[derive(Parser)]
#[command(name = "linklister")]
#[command(version)]
#[command(about = "A small URL shortener with per-redirect usage logging", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// List links, newest first
    Links {
        /// Only links created by this user
        #[arg(long)]
        owner: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// List users
    List,

    /// Remove a user that owns no links
    Remove { username: String },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_add() {
        let cli = Cli::try_parse_from([
            "linklister",
            "-c",
            "custom.toml",
            "user",
            "add",
            "alice",
            "--password",
            "s3cret",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::User {
                action: UserCommands::Add { username, password },
            }) => {
                assert_eq!(username, "alice");
                assert_eq!(password.as_deref(), Some("s3cret"));
            }
            _ => panic!("expected user add"),
        }
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["linklister"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_links_owner_filter() {
        let cli = Cli::try_parse_from(["linklister", "links", "--owner", "bob"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Links { owner: Some(ref o) }) if o == "bob"
        ));
    }
}

use clap::Parser;
use tracing::info;

use linklister::cli::{Cli, Commands};
use linklister::config::init_config;
use linklister::interfaces::cli::run_cli_command;
use linklister::runtime::modes::run_server;
use linklister::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            // Must be held until exit so buffered log lines are flushed
            let _guard = init_logging(&config.logging)?;
            info!("linklister {} starting", env!("CARGO_PKG_VERSION"));
            run_server().await
        }
        command => {
            if let Err(e) = run_cli_command(command, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

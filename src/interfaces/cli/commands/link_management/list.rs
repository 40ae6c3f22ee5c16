//! List links command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{LinkService, UserService};
use crate::storage::Actor;

/// Print links newest first, optionally only those created by `owner`
pub async fn list_links(
    links: &LinkService,
    users: &UserService,
    owner: Option<String>,
) -> Result<(), CliError> {
    let listed = match owner {
        Some(username) => {
            let user = users.find_user(&username).await?;
            links.list_mine(&Actor::from(&user)).await?
        }
        None => links.all_links().await?,
    };

    if listed.is_empty() {
        println!("{} No links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Links:".bold().green());
    println!();
    for entry in &listed {
        println!(
            "  {} -> {} {}",
            entry.short_link.cyan(),
            entry.link.target_url.blue().underline(),
            format!(
                "(#{}, {})",
                entry.link.id,
                entry.link.create_date.format("%Y-%m-%d %H:%M:%S UTC")
            )
            .dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} links",
        "ℹ".bold().blue(),
        listed.len().to_string().green()
    );
    Ok(())
}

//! 列出用户

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::UserService;

pub async fn user_list(users: &UserService) -> Result<(), CliError> {
    let all = users.list_users().await?;

    if all.is_empty() {
        println!(
            "{} No users yet. Create one with `linklister user add <username>`",
            "ℹ".bold().blue()
        );
        return Ok(());
    }

    println!("{}", "Users:".bold().green());
    println!();
    for user in &all {
        let links = users.owned_link_count(user.id).await?;
        let status = if user.is_active {
            "active".green()
        } else {
            "inactive".red()
        };
        println!(
            "  {} {} {}",
            user.username.cyan(),
            status,
            format!(
                "({} links, joined {})",
                links,
                user.created_at.format("%Y-%m-%d")
            )
            .dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} users",
        "ℹ".bold().blue(),
        all.len().to_string().green()
    );
    Ok(())
}

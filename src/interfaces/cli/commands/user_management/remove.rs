//! 删除用户

use colored::Colorize;

use crate::errors::LinklisterError;
use crate::interfaces::cli::CliError;
use crate::services::UserService;

pub async fn user_remove(users: &UserService, username: String) -> Result<(), CliError> {
    match users.delete_user(&username).await {
        Ok(user) => {
            println!(
                "{} Removed user {}",
                "✓".bold().green(),
                user.username.cyan()
            );
            Ok(())
        }
        Err(e @ LinklisterError::Protected(_)) => Err(CliError::CommandError(format!(
            "{} (delete those links first)",
            e.message()
        ))),
        Err(e) => Err(e.into()),
    }
}

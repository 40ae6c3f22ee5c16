//! 新建用户

use std::io::{self, IsTerminal};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{UserService, validate_username};

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::ParseError(
            "No password provided. Use --password or run interactively.".to_string(),
        ));
    }

    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))?;
    let confirm = rpassword::prompt_password("Password (again): ")
        .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))?;

    if password != confirm {
        return Err(CliError::ParseError("Passwords do not match".to_string()));
    }

    Ok(password)
}

pub async fn user_add(
    users: &UserService,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    // 先校验用户名，避免输完密码才报错
    validate_username(&username)?;

    let password = match password {
        Some(p) => p,
        None => prompt_password_with_confirm()?,
    };

    let user = users.create_user(&username, &password).await?;

    println!(
        "{} Created user {} (id {})",
        "✓".bold().green(),
        user.username.cyan(),
        user.id
    );
    Ok(())
}

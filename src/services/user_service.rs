//! User accounts and credential checks

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{LinklisterError, Result};
use crate::storage::{SeaOrmStorage, User};
use crate::utils::password::{hash_password, verify_password};

const MAX_USERNAME_LEN: usize = 150;

/// Letters, digits and `@ . + - _`, at most 150 characters
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(LinklisterError::validation("Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(LinklisterError::validation(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(LinklisterError::validation(
            "Username may contain only letters, digits and @/./+/-/_",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        validate_username(username)?;
        let hash = hash_password(password)?;
        self.storage.create_user(username, &hash).await
    }

    /// Check credentials; every failure is reported as the same `AuthFailed`
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let failed = || LinklisterError::auth_failed("Invalid username or password");

        let Some(user) = self.storage.find_user_by_username(username).await? else {
            warn!("Login attempt for unknown user {}", username);
            return Err(failed());
        };

        if !user.is_active {
            warn!("Login attempt for inactive user {}", username);
            return Err(failed());
        }

        if !verify_password(password, &user.password_hash)? {
            warn!("Wrong password for user {}", username);
            return Err(failed());
        }

        info!("User {} authenticated", username);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.storage.get_user(id).await
    }

    pub async fn find_user(&self, username: &str) -> Result<User> {
        self.storage
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| LinklisterError::not_found(format!("User {} not found", username)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }

    pub async fn owned_link_count(&self, user_id: i64) -> Result<u64> {
        self.storage.count_links_by_owner(user_id).await
    }

    /// Fails with `Protected` while the user still owns links
    pub async fn delete_user(&self, username: &str) -> Result<User> {
        self.storage.delete_user(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a.b+c-d_e@f").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("slash/no").is_err());
        assert!(validate_username(&"x".repeat(151)).is_err());
        assert!(validate_username(&"x".repeat(150)).is_ok());
    }
}

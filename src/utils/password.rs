//! 密码哈希（Argon2id）

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::{LinklisterError, Result};

/// 对密码进行 Argon2id 哈希
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(LinklisterError::validation("Password cannot be empty"));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LinklisterError::serialization(format!("Password hash error: {}", e)))
}

/// 验证密码是否匹配哈希；哈希本身损坏时返回错误
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| LinklisterError::serialization(format!("Password verify error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{Actor, User};

const ACCESS_TOKEN_TYPE: &str = "access";

/// Access Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

impl AccessClaims {
    pub fn actor(&self) -> Option<Actor> {
        Some(Actor {
            user_id: self.sub.parse().ok()?,
            username: self.username.clone(),
        })
    }
}

/// Issues and validates login session tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_minutes,
        }
    }

    /// Use the configured secret, or a random one when empty
    /// (sessions then end with the process).
    pub fn from_config(config: &crate::config::AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            warn!("JWT secret not configured, generating a random one");
            crate::utils::generate_random_code(48)
        } else {
            config.jwt_secret.clone()
        };
        Self::new(&secret, config.access_token_minutes)
    }

    pub fn generate_access_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.access_token_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key_32_bytes_long!!", 15)
    }

    fn user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            password_hash: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service();
        let token = service.generate_access_token(&user()).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!(
            claims.actor(),
            Some(Actor {
                user_id: 42,
                username: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().generate_access_token(&user()).unwrap();
        let other = JwtService::new("different_secret_key_32_bytes!!", 15);
        assert!(other.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(service().validate_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!"),
        )
        .unwrap();

        assert!(service().validate_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_token_type_rejected() {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!"),
        )
        .unwrap();

        assert!(service().validate_access_token(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_has_no_actor() {
        let claims = AccessClaims {
            sub: "admin".to_string(),
            username: "admin".to_string(),
            iat: 0,
            exp: 0,
            jti: String::new(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        assert_eq!(claims.actor(), None);
    }
}

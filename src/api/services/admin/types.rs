//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;

/// 统一 JSON 响应包装
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub username: String,
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Returned by `GET /auth/login`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginHint {
    pub login_url: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Admin 路由共享设置
#[derive(Clone, Debug)]
pub struct AdminSettings {
    pub admin_prefix: String,
}

impl AdminSettings {
    pub fn new(admin_prefix: impl Into<String>) -> Self {
        Self {
            admin_prefix: admin_prefix.into(),
        }
    }

    /// Absolute path of a route under the admin prefix
    pub fn route(&self, relative: &str) -> String {
        format!("{}{}", self.admin_prefix.trim_end_matches('/'), relative)
    }
}

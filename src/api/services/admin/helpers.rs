//! Admin API 帮助函数

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::api::constants;
use crate::config::{AuthConfig, SameSitePolicy};
use crate::errors::LinklisterError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinklisterError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_linklister(err: &LinklisterError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, LinklisterError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            if e.http_status().is_server_error() {
                tracing::error!("Admin API: {}", e);
            }
            error_from_linklister(&e)
        }
    }
}

/// Only same-site absolute paths are accepted as post-login targets
pub fn sanitize_next(next: Option<&str>) -> Option<String> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
        .map(str::to_string)
}

/// Session cookie 构建器
#[derive(Clone, Debug)]
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    access_token_minutes: u64,
}

impl CookieBuilder {
    pub fn from_config(config: &AuthConfig) -> Self {
        let same_site = match config.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.cookie_secure,
            access_token_minutes: config.access_token_minutes,
        }
    }

    fn build_cookie_base(
        &self,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(constants::ACCESS_COOKIE_NAME, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_access_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            token,
            actix_web::cookie::time::Duration::minutes(self.access_token_minutes as i64),
        )
    }

    pub fn build_expired_access_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), actix_web::cookie::time::Duration::ZERO)
    }

    pub fn access_token_minutes(&self) -> u64 {
        self.access_token_minutes
    }
}

//! Admin API 认证相关端点

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, error, info};

use crate::api::jwt::JwtService;
use crate::errors::LinklisterError;
use crate::services::UserService;
use crate::utils::ip::{TrustedProxies, extract_client_ip};

use super::error_code::ErrorCode;
use super::helpers::{
    CookieBuilder, error_from_linklister, error_response, json_response, sanitize_next,
};
use super::types::{
    AdminSettings, ApiResponse, LoginCredentials, LoginHint, LoginResponse, MessageResponse,
    NextQuery,
};

/// 登录限流 key：客户端 IP（仅信任配置的代理转发头）
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let trusted = req
            .app_data::<web::Data<TrustedProxies>>()
            .map(|t| t.get_ref().clone())
            .unwrap_or_default();

        extract_client_ip(req.request(), &trusted)
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract client IP"))
    }
}

/// 登录限流器：每秒补充 1 个令牌，突发最多 5 次，超限返回 429
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// `POST /auth/login`
pub async fn login(
    body: web::Json<LoginCredentials>,
    query: web::Query<NextQuery>,
    users: web::Data<UserService>,
    jwt: web::Data<JwtService>,
    cookies: web::Data<CookieBuilder>,
) -> ActixResult<impl Responder> {
    let credentials = body.into_inner();

    let user = match users
        .authenticate(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => user,
        Err(e @ LinklisterError::AuthFailed(_)) => {
            info!("Admin API: login failed for {}", credentials.username);
            return Ok(error_from_linklister(&e));
        }
        Err(e) => {
            error!("Admin API: login error: {}", e);
            return Ok(error_from_linklister(&e));
        }
    };

    let access_token = match jwt.generate_access_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Admin API: failed to generate access token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    info!("Admin API: {} logged in", user.username);

    Ok(HttpResponse::Ok()
        .cookie(cookies.build_access_cookie(access_token.clone()))
        .json(ApiResponse {
            code: ErrorCode::Success,
            message: "Login successful".to_string(),
            data: Some(LoginResponse {
                username: user.username,
                access_token,
                expires_in: cookies.access_token_minutes() * 60,
                next: sanitize_next(query.next.as_deref()),
            }),
        }))
}

/// `GET /auth/login`: where unauthenticated requests are sent
pub async fn login_hint(
    query: web::Query<NextQuery>,
    settings: web::Data<AdminSettings>,
) -> ActixResult<impl Responder> {
    Ok(json_response(
        StatusCode::OK,
        ErrorCode::Unauthorized,
        "Login required: POST {\"username\", \"password\"} as JSON to login_url",
        Some(LoginHint {
            login_url: settings.route(crate::api::constants::LOGIN_ROUTE),
            method: "POST".to_string(),
            next: sanitize_next(query.next.as_deref()),
        }),
    ))
}

/// `POST /auth/logout`
pub async fn logout(cookies: web::Data<CookieBuilder>) -> ActixResult<impl Responder> {
    info!("Admin API: logout");

    Ok(HttpResponse::Ok()
        .cookie(cookies.build_expired_access_cookie())
        .json(ApiResponse {
            code: ErrorCode::Success,
            message: "Logged out".to_string(),
            data: Some(MessageResponse {
                message: "Logged out".to_string(),
            }),
        }))
}

//! Login-required middleware
//!
//! Accepts `Authorization: Bearer <jwt>` or the access cookie. On success the
//! [`Actor`] is placed in the request extensions; otherwise the request is
//! redirected to the login route with the original path in `next`.

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::header::{CONTENT_TYPE, LOCATION},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::api::constants;
use crate::api::jwt::JwtService;
use crate::api::services::admin::{ApiResponse, ErrorCode, error_from_linklister};
use crate::errors::LinklisterError;
use crate::storage::Actor;

#[derive(Clone)]
pub struct LoginRequired {
    jwt: Arc<JwtService>,
    admin_prefix: Rc<str>,
}

impl LoginRequired {
    pub fn new(jwt: Arc<JwtService>, admin_prefix: &str) -> Self {
        Self {
            jwt,
            admin_prefix: Rc::from(admin_prefix.trim_end_matches('/')),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginRequiredMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredMiddleware {
            service: Rc::new(service),
            jwt: self.jwt.clone(),
            admin_prefix: self.admin_prefix.clone(),
        }))
    }
}

pub struct LoginRequiredMiddleware<S> {
    service: Rc<S>,
    jwt: Arc<JwtService>,
    admin_prefix: Rc<str>,
}

impl<S, B> LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Redirect to the login route, remembering where the user was going
    fn handle_unauthenticated(
        req: ServiceRequest,
        admin_prefix: &str,
    ) -> ServiceResponse<EitherBody<B>> {
        let next = match req.query_string() {
            "" => req.path().to_string(),
            q => format!("{}?{}", req.path(), q),
        };
        let location = format!(
            "{}{}?{}={}",
            admin_prefix,
            constants::LOGIN_ROUTE,
            constants::LOGIN_NEXT_PARAM,
            urlencoding::encode(&next)
        );
        info!("Login required for {}, redirecting", next);

        req.into_response(
            HttpResponse::Found()
                .insert_header((LOCATION, location))
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized,
                    message: "Login required".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
    }

    fn authenticate(jwt: &JwtService, req: &ServiceRequest) -> Option<Actor> {
        let token = Self::extract_bearer_token(req).or_else(|| {
            req.cookie(constants::ACCESS_COOKIE_NAME)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })?;

        match jwt.validate_access_token(&token) {
            Ok(claims) => claims.actor(),
            Err(e) => {
                debug!("Access token rejected: {}", e);
                None
            }
        }
    }

    fn is_public_endpoint(req: &ServiceRequest, admin_prefix: &str) -> bool {
        req.path()
            .strip_prefix(admin_prefix)
            .is_some_and(|rest| rest == constants::LOGIN_ROUTE || rest == "/auth/logout")
    }
}

impl<S, B> Service<ServiceRequest> for LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let jwt = self.jwt.clone();
        let admin_prefix = self.admin_prefix.clone();

        Box::pin(async move {
            if Self::is_public_endpoint(&req, &admin_prefix) {
                trace!("Auth endpoint accessed - bypassing login check");
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match Self::authenticate(&jwt, &req) {
                Some(actor) => {
                    trace!("Authenticated as {}", actor.username);
                    req.extensions_mut().insert(actor);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => Ok(Self::handle_unauthenticated(req, &admin_prefix)),
            }
        })
    }
}

/// Handlers take `actor: Actor` to receive the authenticated user. Outside
/// `LoginRequired` there is none and the request is refused as `Forbidden`.
impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<Actor>().cloned().ok_or_else(|| {
            let err = LinklisterError::forbidden("Login required");
            InternalError::from_response(err.to_string(), error_from_linklister(&err)).into()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Utc;

    use crate::storage::User;

    async fn whoami(actor: Actor) -> String {
        actor.username
    }

    #[actix_rt::test]
    async fn test_actor_without_login_is_forbidden() {
        let app =
            test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["message"], "Login required");
    }

    #[actix_rt::test]
    async fn test_actor_from_bearer_token() {
        let jwt = Arc::new(JwtService::new("middleware-test-secret", 5));
        let token = jwt
            .generate_access_token(&User {
                id: 7,
                username: "carol".to_string(),
                password_hash: String::new(),
                is_active: true,
                created_at: Utc::now(),
            })
            .unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(LoginRequired::new(jwt, "/admin"))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "carol");
    }
}

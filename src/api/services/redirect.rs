//! Public redirect endpoint

use std::borrow::Cow;

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, LOCATION, REFERER, USER_AGENT};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::api::constants::LIST_MINE_ROUTE;
use crate::api::services::admin::AdminSettings;
use crate::services::{ClientInfo, RedirectOutcome, RedirectResolver};
use crate::utils::ip::{TrustedProxies, extract_client_ip};

pub struct RedirectService;

impl RedirectService {
    /// `GET|HEAD /{path:.+}`
    pub async fn handle_redirect(
        req: HttpRequest,
        resolver: web::Data<RedirectResolver>,
        trusted: web::Data<TrustedProxies>,
    ) -> impl Responder {
        let path = Self::decoded_path(&req);
        let client = Self::client_info(&req, &trusted);
        trace!("Resolving {} (query: {:?})", path, client.query_string);

        match resolver.resolve(&path, &client).await {
            Ok(RedirectOutcome::Redirect {
                target_url,
                referer,
                ..
            }) => HttpResponse::Found()
                .insert_header((LOCATION, target_url))
                .insert_header((REFERER, referer))
                .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                .finish(),
            Ok(RedirectOutcome::NotFound) => Self::not_found_response(),
            Err(e) => {
                error!("Redirect lookup failed for {}: {}", path, e);
                Self::error_response()
            }
        }
    }

    /// `GET /`: send visitors to their own link list
    pub async fn root_redirect(settings: web::Data<AdminSettings>) -> impl Responder {
        HttpResponse::Found()
            .insert_header((LOCATION, settings.route(LIST_MINE_ROUTE)))
            .finish()
    }

    fn decoded_path(req: &HttpRequest) -> Cow<'_, str> {
        let raw = req.path();
        urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
    }

    fn client_info(req: &HttpRequest, trusted: &TrustedProxies) -> ClientInfo {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };

        ClientInfo {
            ip_address: extract_client_ip(req, trusted),
            query_string: req.query_string().to_string(),
            referrer: header(REFERER),
            user_agent: header(USER_AGENT),
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Root and catch-all redirect routes; register after every other scope
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(RedirectService::root_redirect))
        .route(
            "/{path:.+}",
            web::get().to(RedirectService::handle_redirect),
        )
        .route(
            "/{path:.+}",
            web::head().to(RedirectService::handle_redirect),
        );
}

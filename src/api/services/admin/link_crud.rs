//! Admin API 链接管理端点

use actix_web::http::StatusCode;
use actix_web::http::header::{LOCATION, REFERER};
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};
use url::Url;

use crate::api::constants::LIST_MINE_ROUTE;
use crate::errors::LinklisterError;
use crate::services::{AddLinkOutcome, AddLinkRequest, LinkService};
use crate::storage::Actor;

use super::error_code::ErrorCode;
use super::helpers::{
    api_result, error_from_linklister, error_response, json_response, sanitize_next,
};
use super::types::AdminSettings;

/// `GET /links`
pub async fn list_all(
    actor: Actor,
    service: web::Data<LinkService>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: {} listing all links", actor.username);
    Ok(api_result(service.list_all(&actor).await))
}

/// `GET /links/mine`
pub async fn list_mine(
    actor: Actor,
    service: web::Data<LinkService>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: {} listing own links", actor.username);
    Ok(api_result(service.list_mine(&actor).await))
}

/// `POST /links`
pub async fn add_link(
    actor: Actor,
    service: web::Data<LinkService>,
    body: web::Json<AddLinkRequest>,
) -> ActixResult<impl Responder> {
    let valid = match body.validate() {
        Ok(valid) => valid,
        Err(e) => {
            trace!("Admin API: rejected link from {}: {}", actor.username, e);
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::from(&e),
                &e.to_string(),
            ));
        }
    };

    match service.add_valid_link(&actor, valid).await {
        Ok(outcome) => {
            let notice = outcome.notice();
            Ok(match outcome {
                AddLinkOutcome::Created(link) => {
                    json_response(StatusCode::CREATED, ErrorCode::Success, notice, Some(link))
                }
                AddLinkOutcome::AlreadyExists { .. } => {
                    error_response(StatusCode::OK, ErrorCode::LinkAlreadyExists, &notice)
                }
            })
        }
        Err(e) => Ok(api_result::<()>(Err(e))),
    }
}

/// Where to send the browser after a delete: the referring page when it is
/// on this site, otherwise the caller's own links.
fn redirect_back(req: &HttpRequest, settings: &AdminSettings) -> String {
    let referer = req
        .headers()
        .get(REFERER)
        .and_then(|h| h.to_str().ok())
        .filter(|r| !r.is_empty());

    let same_site = referer.and_then(|r| match Url::parse(r) {
        Ok(url) => {
            let authority = match url.port() {
                Some(port) => format!("{}:{}", url.host_str()?, port),
                None => url.host_str()?.to_string(),
            };
            if authority != req.connection_info().host() {
                return None;
            }
            match url.query() {
                Some(q) => Some(format!("{}?{}", url.path(), q)),
                None => Some(url.path().to_string()),
            }
        }
        // relative reference
        Err(_) => sanitize_next(Some(r)),
    });

    same_site.unwrap_or_else(|| settings.route(LIST_MINE_ROUTE))
}

/// `DELETE /links/{id}` and `POST /links/{id}/delete`
///
/// Responds with 303 back to the referring page.
pub async fn delete_link(
    req: HttpRequest,
    actor: Actor,
    service: web::Data<LinkService>,
    settings: web::Data<AdminSettings>,
    path: web::Path<i64>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();

    match service.delete_link(&actor, id).await {
        Ok(link) => {
            let location = redirect_back(&req, &settings);

            info!(
                "Admin API: link {} deleted, redirecting to {}",
                link.short_path, location
            );
            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, location))
                .finish())
        }
        Err(e @ LinklisterError::NotFound(_)) => Ok(error_response(
            e.http_status(),
            ErrorCode::LinkNotFound,
            e.message(),
        )),
        Err(e) => Ok(error_from_linklister(&e)),
    }
}

/// `GET /links/{id}/usage`
pub async fn show_usage(
    actor: Actor,
    service: web::Data<LinkService>,
    path: web::Path<i64>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    trace!("Admin API: {} viewing usage of link {}", actor.username, id);

    match service.show_usage(&actor, id).await {
        Err(e @ LinklisterError::NotFound(_)) => Ok(error_response(
            e.http_status(),
            ErrorCode::LinkNotFound,
            e.message(),
        )),
        result => Ok(api_result(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn settings() -> AdminSettings {
        AdminSettings::new("/admin")
    }

    #[test]
    fn test_redirect_back_same_site() {
        let req = TestRequest::default()
            .insert_header(("Host", "go.example.org"))
            .insert_header((REFERER, "https://go.example.org/admin/links?page=2"))
            .to_http_request();
        assert_eq!(redirect_back(&req, &settings()), "/admin/links?page=2");

        let req = TestRequest::default()
            .insert_header((REFERER, "/admin/links"))
            .to_http_request();
        assert_eq!(redirect_back(&req, &settings()), "/admin/links");
    }

    #[test]
    fn test_redirect_back_rejects_other_sites() {
        for referer in [
            "https://evil.example/phish",
            "https://go.example.org:8443/admin/links",
            "//evil.example/phish",
            "javascript:alert(1)",
        ] {
            let req = TestRequest::default()
                .insert_header(("Host", "go.example.org"))
                .insert_header((REFERER, referer))
                .to_http_request();
            assert_eq!(
                redirect_back(&req, &settings()),
                "/admin/links/mine",
                "{}",
                referer
            );
        }
    }

    #[test]
    fn test_redirect_back_without_referer() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(redirect_back(&req, &settings()), "/admin/links/mine");
    }
}

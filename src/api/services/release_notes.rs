//! Embedded release notes

use actix_web::{HttpResponse, Responder};
use rust_embed::Embed;
use tracing::{error, trace};

#[derive(Embed)]
#[folder = "assets/"]
struct Assets;

const RELEASE_NOTES: &str = "release_notes.md";

/// `GET /release-notes`
pub async fn release_notes() -> impl Responder {
    trace!("Serving embedded release notes");

    match Assets::get(RELEASE_NOTES) {
        Some(content) => HttpResponse::Ok()
            .content_type("text/markdown; charset=utf-8")
            .body(content.data.into_owned()),
        None => {
            error!("{} missing from embedded assets", RELEASE_NOTES);
            HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body("Not Found")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    #[actix_rt::test]
    async fn test_release_notes_served() {
        let app =
            test::init_service(App::new().route("/release-notes", web::get().to(release_notes)))
                .await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/release-notes").to_request(),
        )
        .await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Release notes"));
    }
}

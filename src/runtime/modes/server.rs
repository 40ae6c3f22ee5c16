//! Server mode
//!
//! Builds the HTTP server from the startup context and runs it until it
//! exits or a shutdown signal arrives.

use actix_web::{App, HttpServer, middleware::Compress};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// Reads the configuration installed by `init_config`.
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();
    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let db_for_shutdown = startup.storage.get_db().clone();

    let workers = config.server.workers.clamp(1, 32);
    info!("Using {} HTTP workers", workers);

    if config.server.trusted_proxies.is_empty() {
        info!("No trusted proxies configured; client IPs come from the socket peer");
    } else {
        warn!(
            "Trusting forwarded headers from: {:?}",
            config.server.trusted_proxies
        );
    }
    info!("Admin routes mounted at {}", config.server.admin_prefix);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .configure(|cfg| startup.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}

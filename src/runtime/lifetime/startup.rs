//! Server startup: storage, services and shared HTTP state

use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::jwt::JwtService;
use crate::api::middleware::LoginRequired;
use crate::api::services::admin::{AdminSettings, CookieBuilder};
use crate::api::services::{admin_routes, redirect_routes};
use crate::config::StaticConfig;
use crate::services::{LinkService, LogTail, RedirectResolver, UserService};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::ip::TrustedProxies;

/// Everything the HTTP workers share
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: web::Data<LinkService>,
    pub user_service: web::Data<UserService>,
    pub redirect_resolver: web::Data<RedirectResolver>,
    pub jwt: Arc<JwtService>,
    pub cookies: web::Data<CookieBuilder>,
    pub admin_settings: web::Data<AdminSettings>,
    pub trusted_proxies: web::Data<TrustedProxies>,
    pub log_tail: web::Data<LogTail>,
}

impl StartupContext {
    /// Wire services on top of an already opened storage
    pub fn build(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let prefix = config.links.prefix.clone();
        if prefix.is_empty() {
            warn!("links.prefix is empty; short links will be bare paths");
        }

        Self {
            link_service: web::Data::new(LinkService::new(storage.clone(), prefix.clone())),
            user_service: web::Data::new(UserService::new(storage.clone())),
            redirect_resolver: web::Data::new(RedirectResolver::new(storage.clone(), prefix)),
            jwt: Arc::new(JwtService::from_config(&config.auth)),
            cookies: web::Data::new(CookieBuilder::from_config(&config.auth)),
            admin_settings: web::Data::new(AdminSettings::new(config.server.admin_prefix.clone())),
            trusted_proxies: web::Data::new(TrustedProxies::new(
                config.server.trusted_proxies.clone(),
            )),
            log_tail: web::Data::new(LogTail::from_config(&config.logging)),
            storage,
        }
    }

    /// Register app data and routes. The admin scope goes before the
    /// catch-all redirect so management paths are never resolved as links.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.link_service.clone())
            .app_data(self.user_service.clone())
            .app_data(self.redirect_resolver.clone())
            .app_data(web::Data::from(self.jwt.clone()))
            .app_data(self.cookies.clone())
            .app_data(self.admin_settings.clone())
            .app_data(self.trusted_proxies.clone())
            .app_data(self.log_tail.clone())
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .service(
                admin_routes(&self.admin_settings.admin_prefix).wrap(LoginRequired::new(
                    self.jwt.clone(),
                    &self.admin_settings.admin_prefix,
                )),
            )
            .configure(redirect_routes);
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::build(storage, config);

    info!(
        "Pre-startup completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}

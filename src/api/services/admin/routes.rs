//! Admin API 路由配置
//!
//! 调用方负责用 `LoginRequired` 包裹整个 scope，登录/登出端点由中间件放行。

use actix_web::web;

use crate::api::services::release_notes::release_notes;

use super::auth::{login, login_hint, login_rate_limiter, logout};
use super::link_crud::{add_link, delete_link, list_all, list_mine, show_usage};
use super::logs::{get_logs, get_logs_n};

/// 认证路由 `/auth`
///
/// - POST /auth/login - 登录（带限流）
/// - GET /auth/login - 登录说明（未登录重定向的目标）
/// - POST /auth/logout - 登出
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login).wrap(login_rate_limiter()))
        .route("/login", web::get().to(login_hint))
        .route("/logout", web::post().to(logout))
}

/// 链接管理路由 `/links`
///
/// - GET /links - 全部链接
/// - POST /links - 新建链接
/// - GET /links/mine - 当前用户的链接
/// - DELETE /links/{id}, POST /links/{id}/delete - 删除链接
/// - GET /links/{id}/usage - 访问记录
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(list_all))
        .route("", web::post().to(add_link))
        // must be before /{id}
        .route("/mine", web::get().to(list_mine))
        .route("/{id}/usage", web::get().to(show_usage))
        .route("/{id}/delete", web::post().to(delete_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// 日志路由 `/logs`
pub fn logs_routes() -> actix_web::Scope {
    web::scope("/logs")
        .route("", web::get().to(get_logs))
        .route("/{line_count}", web::get().to(get_logs_n))
}

/// Admin 路由，挂在 `admin_prefix` 下
pub fn admin_routes(admin_prefix: &str) -> actix_web::Scope {
    web::scope(admin_prefix)
        .service(auth_routes())
        .service(links_routes())
        .service(logs_routes())
        .route("/release-notes", web::get().to(release_notes))
}

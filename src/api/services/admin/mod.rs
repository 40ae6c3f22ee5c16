//! Admin API 服务模块
//!
//! - 认证（登录、登出）
//! - 链接管理（新建、列表、删除、访问记录）
//! - 日志查看

pub mod auth;
pub mod error_code;
mod helpers;
mod link_crud;
mod logs;
pub mod routes;
mod types;

pub use types::*;

pub use helpers::{
    CookieBuilder, api_result, error_from_linklister, error_response, json_response,
    sanitize_next, success_response,
};

pub use error_code::ErrorCode;

pub use auth::{login, login_hint, login_rate_limiter, logout};

pub use link_crud::{add_link, delete_link, list_all, list_mine, show_usage};

pub use logs::{get_logs, get_logs_n};

pub use routes::admin_routes;

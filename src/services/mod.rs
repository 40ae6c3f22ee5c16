//! Service layer
//!
//! Business logic shared by the HTTP handlers and the CLI.

mod link_service;
mod log_tail;
mod redirect;
mod usage_recorder;
mod user_service;

pub use link_service::*;
pub use log_tail::{LogTail, LogTailResult};
pub use redirect::{RedirectOutcome, RedirectResolver};
pub use usage_recorder::{ClientInfo, UsageRecorder};
pub use user_service::{UserService, validate_username};

//! CLI command implementations

pub mod config_management;
mod link_management;
mod user_management;

pub use config_management::config_generate;
pub use link_management::list_links;
pub use user_management::{user_add, user_list, user_remove};

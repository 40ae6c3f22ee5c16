//! User account CLI commands

mod add;
mod list;
mod remove;

pub use add::user_add;
pub use list::user_list;
pub use remove::user_remove;

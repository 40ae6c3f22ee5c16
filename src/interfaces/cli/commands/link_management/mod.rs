//! Link management CLI commands

mod list;

pub use list::list_links;

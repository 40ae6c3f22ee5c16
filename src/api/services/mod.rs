pub mod admin;
pub mod redirect;
pub mod release_notes;

pub use admin::admin_routes;
pub use redirect::{RedirectService, redirect_routes};

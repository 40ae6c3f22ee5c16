pub mod auth;
pub mod request_id;

pub use auth::LoginRequired;
pub use request_id::{RequestId, RequestIdMiddleware};

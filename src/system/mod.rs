//! System-level modules
//!
//! - Logging initialisation

pub mod logging;

pub use logging::init_logging;

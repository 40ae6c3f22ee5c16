//! Linklister - a small URL shortener
//!
//! Registered users map short paths to target URLs. Every redirect served
//! through a short path is recorded as a usage event.
//!
//! # Architecture
//! - `storage`: SeaORM persistence for users, links and usage events
//! - `services`: link management, redirect resolution, usage recording
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line interface
//! - `config`: configuration loading
//! - `runtime`: server startup and shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

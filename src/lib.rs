//! Contact API - contact management backend
//!
//! Users register and log in to receive an API token, then manage their own
//! contacts and each contact's postal addresses over a JSON REST API.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};

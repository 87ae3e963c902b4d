//! HTTP middleware for the contact API
//!
//! - API token authentication middleware and `AuthUser` extractor
//! - Error response normalization

pub mod auth;
pub mod error_response;

pub use auth::{require_auth_middleware, AuthUser, API_TOKEN_HEADER};
pub use error_response::normalize_error_response;

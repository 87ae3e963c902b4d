//! API token authentication
//!
//! Provides:
//! - `require_auth_middleware`, which resolves the `X-API-TOKEN` header to a
//!   user and stores it in the request extensions
//! - `AuthUser` extractor handing that user to handlers

use std::ops::Deref;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::User;
use crate::error::AppError;
use crate::state::HasServices;

/// Header carrying the session token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// The user resolved from the request's token, scoped to that request
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}

/// Extract the raw token value; missing, non-UTF-8 or blank headers are rejected
fn extract_api_token(headers: &HeaderMap) -> Result<String, AppError> {
    let token = headers
        .get(API_TOKEN_HEADER)
        .ok_or_else(unauthorized)?
        .to_str()
        .map_err(|_| unauthorized())?
        .trim();

    if token.is_empty() {
        return Err(unauthorized());
    }

    Ok(token.to_string())
}

/// Authentication enforcement middleware
///
/// Requests without a token matching a stored user are rejected with 401
/// before reaching the handler.
pub async fn require_auth_middleware<S: HasServices>(
    State(state): State<S>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_api_token(request.headers()) {
        Ok(token) => token,
        Err(err) => return err.into_response(),
    };

    match state.user_service().authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Err(err) => {
            if matches!(err, AppError::Unauthorized(_)) {
                warn!(path = %request.uri().path(), "Rejected unknown API token");
            }
            err.into_response()
        }
    }
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`require_auth_middleware`]; elsewhere it
/// rejects with 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}

//! REST API shared utilities (response types, pagination)

pub mod address;
pub mod contact;
pub mod health;
pub mod user;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of `data` for operations without a payload (logout, deletes)
pub const OK: &str = "Ok";

/// Unwrap a JSON body, reporting a missing content type, malformed JSON or
/// wrongly typed fields as [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` and pass it through here so
/// shape errors answer 400 like every other invalid request.
pub fn extract_json<T>(
    result: std::result::Result<Json<T>, JsonRejection>,
) -> crate::error::Result<T> {
    result
        .map(|Json(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub current_page: i64,
    pub total_page: i64,
    pub size: i64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, size: i64, total: i64) -> Self {
        let total_page = if size > 0 {
            (total + size - 1) / size
        } else {
            0
        };
        Self {
            data,
            paging: Paging {
                current_page: page,
                total_page,
                size,
            },
        }
    }
}

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl SuccessResponse<&'static str> {
    pub fn ok() -> Self {
        Self { data: OK }
    }
}

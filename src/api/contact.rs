//! Contact API handlers

use crate::api::{extract_json, PaginatedResponse, SuccessResponse};
use crate::domain::{ContactInput, ContactResponse, SearchContactInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};

/// Create contact
pub async fn create<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let contact = state.contact_service().create(&user, input).await?;
    Ok(Json(SuccessResponse::new(ContactResponse::from(contact))))
}

/// Get contact by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let contact = state.contact_service().get(&user, id).await?;
    Ok(Json(SuccessResponse::new(ContactResponse::from(contact))))
}

/// Replace a contact's fields
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let contact = state.contact_service().update(&user, id, input).await?;
    Ok(Json(SuccessResponse::new(ContactResponse::from(contact))))
}

/// Delete contact and its addresses
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.contact_service().delete(&user, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Search the current user's contacts
pub async fn search<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Query(query): Query<SearchContactInput>,
) -> Result<impl IntoResponse> {
    let page = state.contact_service().search(&user, query).await?;
    let contacts = page
        .contacts
        .into_iter()
        .map(ContactResponse::from)
        .collect();

    Ok(Json(PaginatedResponse::new(
        contacts, page.page, page.size, page.total,
    )))
}

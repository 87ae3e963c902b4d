//! Address API handlers, nested under a contact

use crate::api::{extract_json, SuccessResponse};
use crate::domain::{AddressInput, AddressResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

/// Create address for a contact
pub async fn create<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<i64>,
    body: std::result::Result<Json<AddressInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let address = state
        .address_service()
        .create(&user, contact_id, input)
        .await?;
    Ok(Json(SuccessResponse::new(AddressResponse::from(address))))
}

/// List a contact's addresses
pub async fn list<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let addresses: Vec<AddressResponse> = state
        .address_service()
        .list(&user, contact_id)
        .await?
        .into_iter()
        .map(AddressResponse::from)
        .collect();
    Ok(Json(SuccessResponse::new(addresses)))
}

/// Get address by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let address = state.address_service().get(&user, contact_id, id).await?;
    Ok(Json(SuccessResponse::new(AddressResponse::from(address))))
}

/// Replace an address's fields
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
    body: std::result::Result<Json<AddressInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let address = state
        .address_service()
        .update(&user, contact_id, id, input)
        .await?;
    Ok(Json(SuccessResponse::new(AddressResponse::from(address))))
}

/// Delete address
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    Path((contact_id, id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    state
        .address_service()
        .delete(&user, contact_id, id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

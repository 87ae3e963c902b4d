//! User API handlers

use crate::api::{extract_json, SuccessResponse};
use crate::domain::{CreateUserInput, LoginUserInput, UpdateUserInput, UserResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

/// Register a new user
pub async fn register<S: HasServices>(
    State(state): State<S>,
    body: std::result::Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let user = state.user_service().register(input).await?;
    Ok(Json(SuccessResponse::new(UserResponse::from(user))))
}

/// Log in and receive a fresh API token
pub async fn login<S: HasServices>(
    State(state): State<S>,
    body: std::result::Result<Json<LoginUserInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let (user, token) = state.user_service().login(input).await?;
    Ok(Json(SuccessResponse::new(UserResponse::with_token(
        user, token,
    ))))
}

/// Get the current user
pub async fn current(AuthUser(user): AuthUser) -> Result<impl IntoResponse> {
    Ok(Json(SuccessResponse::new(UserResponse::from(user))))
}

/// Update the current user's name and/or password
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
    body: std::result::Result<Json<UpdateUserInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = extract_json(body)?;
    let user = state.user_service().update(&user, input).await?;
    Ok(Json(SuccessResponse::new(UserResponse::from(user))))
}

/// Log out, invalidating the current token
pub async fn logout<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    state.user_service().logout(&user).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Delete the current user together with all of their contacts and addresses
pub async fn delete_account<S: HasServices>(
    State(state): State<S>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    state.user_service().delete(&user).await?;
    Ok(Json(SuccessResponse::ok()))
}

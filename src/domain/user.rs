//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User entity
///
/// Deliberately not `Serialize`: the password hash and token only leave the
/// service layer through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    /// Argon2 PHC string
    pub password: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: String::new(),
            name: String::new(),
            password: String::new(),
            token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Password must be 1-100 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Input for logging in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUserInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Password must be 1-100 characters"))]
    pub password: String,
}

/// Input for updating the current user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Password must be 1-100 characters"))]
    pub password: Option<String>,
}

/// Public user shape. `token` is only present in the login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            token: None,
        }
    }
}

impl UserResponse {
    /// Response for a successful login, carrying the freshly issued token
    pub fn with_token(user: User, token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::from(user)
        }
    }
}

//! Address domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Address entity, owned by exactly one contact
#[derive(Debug, Clone, FromRow)]
pub struct Address {
    pub id: i64,
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Address {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            contact_id: 0,
            street: None,
            city: None,
            province: None,
            country: String::new(),
            postal_code: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating or replacing an address
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(max = 255, message = "Street must be at most 255 characters"))]
    pub street: Option<String>,
    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "Province must be at most 100 characters"))]
    pub province: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Country must be 1-100 characters"))]
    pub country: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 10, message = "Postal code must be 1-10 characters"))]
    pub postal_code: String,
}

/// Public address shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

//! Contact domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Contact entity, owned by exactly one user
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Contact {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating or replacing a contact
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct ContactInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Search filters; each present filter narrows the owner's contact set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive substring of first or last name
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactFilter {
    /// Build a filter. All-blank values count as absent, anything else is
    /// kept verbatim.
    pub fn new(name: Option<String>, email: Option<String>, phone: Option<String>) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            name: present(name),
            email: present(email),
            phone: present(phone),
        }
    }
}

/// Upper bound applied to the requested page size
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// Search request, deserialized straight from the query string
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct SearchContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "Size must be at least 1"))]
    pub size: i64,
}

impl Default for SearchContactInput {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            page: default_page(),
            size: default_size(),
        }
    }
}

impl SearchContactInput {
    pub fn filter(&self) -> ContactFilter {
        ContactFilter::new(self.name.clone(), self.email.clone(), self.phone.clone())
    }
}

/// One page of search results plus what is needed to build paging metadata
#[derive(Debug, Clone)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub page: i64,
    pub size: i64,
    /// Number of contacts matching the filter across all pages
    pub total: i64,
}

/// Public contact shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

//! Profile model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Marketplace member profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub picture_url: Option<String>,
    /// Opaque credential material, never serialized in responses
    #[serde(skip_serializing, default)]
    pub credential: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Create profile payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfile {
    #[validate(length(min = 1, message = "firstname must not be empty"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "lastname must not be empty"))]
    pub lastname: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub picture_url: Option<String>,
    pub password: Option<String>,
}

/// Update profile payload; blank fields preserve stored values
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfile {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub picture_url: Option<String>,
}

/// Profile list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProfileQuery {
    /// Exact (case-insensitive) email lookup
    pub email: Option<String>,
}

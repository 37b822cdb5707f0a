//! Item (listing) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A lendable item listing.
///
/// Availability invariant: `lent` is true iff `borrower_id` is set; when an
/// item is not lent, `borrower_id`, `borrowed_on` and `due_at` are all null.
/// The borrow/return transitions maintain this as a single row write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price_per_day: Decimal,
    pub picture_url: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub owner_id: Uuid,
    pub lent: bool,
    pub borrower_id: Option<Uuid>,
    pub borrowed_on: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_per_day_negative"));
    }
    Ok(())
}

/// Create item payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price_per_day: Decimal,
    pub picture_url: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub owner_id: Uuid,
}

/// Update item payload.
///
/// Fields follow the merge-by-presence convention: absent or blank values
/// (empty strings, a zero price) leave the stored value untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub price_per_day: Option<Decimal>,
    pub picture_url: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
}

/// Item list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ItemQuery {
    /// Only items listed by this owner
    pub owner_id: Option<Uuid>,
    /// Only items currently held by this borrower
    pub borrower_id: Option<Uuid>,
}

/// Direct borrow payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowItem {
    pub borrower_id: Option<Uuid>,
    pub due_at: Option<DateTime<Utc>>,
}

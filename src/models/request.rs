//! Borrow request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Borrow request status. Transitions only pending -> accepted or
/// pending -> denied; terminal once non-pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Denied,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Denied => write!(f, "denied"),
        }
    }
}

/// A borrower's ask to loan a specific item.
///
/// `item_name` and `owner_id` are snapshots taken at creation time; a later
/// rename of the item is not propagated to pending requests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub owner_id: Uuid,
    pub borrower_id: Uuid,
    pub due_at: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields of a request about to be persisted; the registry assigns the
/// identifier, pending status and creation time
#[derive(Debug, Clone)]
pub struct NewBorrowRequest {
    pub item_id: Uuid,
    pub item_name: String,
    pub owner_id: Uuid,
    pub borrower_id: Uuid,
    pub due_at: Option<DateTime<Utc>>,
}

/// Submit request payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub item_id: Uuid,
    pub borrower_id: Option<Uuid>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Owner response payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondRequest {
    pub accepted: bool,
}

/// Pending request as shown in the owner's inbox, with the borrower's
/// display name resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: BorrowRequest,
    pub borrower_name: Option<String>,
}

//! Repository layer for database operations

pub mod items;
pub mod profiles;
pub mod requests;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        item::{CreateItem, Item},
        profile::Profile,
        request::{BorrowRequest, NewBorrowRequest, RequestStatus},
    },
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub items: items::ItemsRepository,
    pub requests: requests::RequestsRepository,
    pub profiles: profiles::ProfilesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            items: items::ItemsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            profiles: profiles::ProfilesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Storage port for item records. The lifecycle coordinator depends on this
/// trait rather than the concrete repository so it can be exercised against
/// in-memory stores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persist a new listing; the store assigns the identifier
    async fn create(&self, new: &CreateItem) -> AppResult<Item>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Item>;
    /// Full-row write keyed by `item.id`
    async fn update(&self, item: &Item) -> AppResult<Item>;
    /// Returns false when the item does not exist
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn list_all(&self) -> AppResult<Vec<Item>>;
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Item>>;
    async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Item>>;
    /// Available -> Loaned transition. Conditional on the item not being
    /// lent; a lost race surfaces as Conflict, a missing row as NotFound.
    async fn mark_borrowed(
        &self,
        id: Uuid,
        borrower_id: Uuid,
        borrowed_on: DateTime<Utc>,
        due_at: Option<DateTime<Utc>>,
    ) -> AppResult<Item>;
    /// Loaned -> Available transition; clears all borrow fields in one write
    async fn mark_returned(&self, id: Uuid) -> AppResult<Item>;
}

/// Storage port for borrow-request records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persist a new request with pending status
    async fn create(&self, new: &NewBorrowRequest) -> AppResult<BorrowRequest>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<BorrowRequest>;
    async fn list_pending_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<BorrowRequest>>;
    /// Status patch conditional on the request still being pending; returns
    /// false when the condition fails
    async fn set_status_if_pending(&self, id: Uuid, status: RequestStatus) -> AppResult<bool>;
}

/// Read-only profile resolution used by the coordinator; profile records are
/// never mutated through this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Profile>;
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Profile>>;
}

//! Borrow requests repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::request::{BorrowRequest, NewBorrowRequest, RequestStatus},
    repository::RequestStore,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Deny every pending request for an item. Used when the listing is
    /// deleted, so the owner inbox never shows requests for missing items.
    pub async fn deny_pending_for_item(&self, item_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE borrow_requests SET status = 'denied' WHERE item_id = $1 AND status = 'pending'",
        )
        .bind(item_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RequestStore for RequestsRepository {
    /// Persist a new request with pending status
    async fn create(&self, new: &NewBorrowRequest) -> AppResult<BorrowRequest> {
        let request = sqlx::query_as::<_, BorrowRequest>(
            r#"
            INSERT INTO borrow_requests (id, item_id, item_name, owner_id, borrower_id, due_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.item_id)
        .bind(&new.item_name)
        .bind(new.owner_id)
        .bind(new.borrower_id)
        .bind(new.due_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// Get request by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<BorrowRequest> {
        sqlx::query_as::<_, BorrowRequest>("SELECT * FROM borrow_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Pending requests for an owner's inbox, oldest first
    async fn list_pending_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            r#"
            SELECT * FROM borrow_requests
            WHERE owner_id = $1 AND status = 'pending'
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Patch the status, conditional on the request still being pending.
    /// A double response loses this race at the row rather than in
    /// application code.
    async fn set_status_if_pending(&self, id: Uuid, status: RequestStatus) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE borrow_requests SET status = $2 WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

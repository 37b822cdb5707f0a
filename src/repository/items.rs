//! Items repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::item::{CreateItem, Item},
    repository::ItemStore,
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl ItemStore for ItemsRepository {
    /// Create a new item listing
    async fn create(&self, new: &CreateItem) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (id, name, price_per_day, picture_url, location, condition, owner_id, lent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(new.price_per_day)
        .bind(&new.picture_url)
        .bind(&new.location)
        .bind(&new.condition)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Get item by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Replace all item fields; callers are responsible for the merge policy
    async fn update(&self, item: &Item) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = $2, price_per_day = $3, picture_url = $4, location = $5,
                condition = $6, owner_id = $7, lent = $8, borrower_id = $9,
                borrowed_on = $10, due_at = $11, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.price_per_day)
        .bind(&item.picture_url)
        .bind(&item.location)
        .bind(&item.condition)
        .bind(item.owner_id)
        .bind(item.lent)
        .bind(item.borrower_id)
        .bind(item.borrowed_on)
        .bind(item.due_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", item.id)))
    }

    /// Delete an item; false when it does not exist
    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM items ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE borrower_id = $1 AND lent ORDER BY created_at DESC",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Mark an item borrowed. The write is conditional on `lent = FALSE`, so
    /// two concurrent borrows serialize at the row and the loser fails.
    async fn mark_borrowed(
        &self,
        id: Uuid,
        borrower_id: Uuid,
        borrowed_on: DateTime<Utc>,
        due_at: Option<DateTime<Utc>>,
    ) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET lent = TRUE, borrower_id = $2, borrowed_on = $3, due_at = $4, updated_at = now()
            WHERE id = $1 AND lent = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(borrower_id)
        .bind(borrowed_on)
        .bind(due_at)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(item) => Ok(item),
            None => {
                if self.exists(id).await? {
                    Err(AppError::Conflict(format!("Item {} is already lent", id)))
                } else {
                    Err(AppError::NotFound(format!("Item with id {} not found", id)))
                }
            }
        }
    }

    /// Mark an item returned, clearing all borrow fields in one write
    async fn mark_returned(&self, id: Uuid) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET lent = FALSE, borrower_id = NULL, borrowed_on = NULL, due_at = NULL,
                updated_at = now()
            WHERE id = $1 AND lent = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(item) => Ok(item),
            None => {
                if self.exists(id).await? {
                    Err(AppError::Conflict(format!("Item {} is not currently lent", id)))
                } else {
                    Err(AppError::NotFound(format!("Item with id {} not found", id)))
                }
            }
        }
    }
}

//! Profiles repository for database operations

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::profile::Profile,
    repository::ProfileStore,
};

#[derive(Clone)]
pub struct ProfilesRepository {
    pool: Pool<Postgres>,
}

impl ProfilesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new profile
    pub async fn create(&self, profile: &Profile) -> AppResult<Profile> {
        let created = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, firstname, lastname, email, phone, address, role, picture_url, credential)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.firstname)
        .bind(&profile.lastname)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(&profile.role)
        .bind(&profile.picture_url)
        .bind(&profile.credential)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Replace all profile fields
    pub async fn update(&self, profile: &Profile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET firstname = $2, lastname = $3, email = $4, phone = $5, address = $6,
                role = $7, picture_url = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.firstname)
        .bind(&profile.lastname)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(&profile.role)
        .bind(&profile.picture_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile with id {} not found", profile.id)))
    }

    /// Delete a profile; false when it does not exist
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles ORDER BY lastname, firstname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Look a profile up by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM profiles WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }
}

#[async_trait]
impl ProfileStore for ProfilesRepository {
    /// Get profile by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile with id {} not found", id)))
    }

    /// Resolve several profiles at once, keyed by id; absent ids are simply
    /// missing from the map
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Profile>> {
        let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles.into_iter().map(|p| (p.id, p)).collect())
    }
}

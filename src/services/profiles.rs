//! Profile management service

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::profile::{CreateProfile, Profile, ProfileQuery, UpdateProfile},
    repository::{ProfileStore, Repository},
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Clone)]
pub struct ProfilesService {
    repository: Repository,
}

impl ProfilesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new profile. Email addresses are unique.
    pub async fn create_profile(&self, payload: CreateProfile) -> AppResult<Profile> {
        payload.validate()?;

        if self.repository.profiles.email_exists(&payload.email, None).await? {
            return Err(AppError::Conflict(
                "A profile with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        // Opaque fingerprint only; real credential handling lives outside
        // this service.
        let credential = payload
            .password
            .map(|p| hex::encode(Sha256::digest(p.as_bytes())));

        let profile = Profile {
            id: Uuid::new_v4(),
            firstname: payload.firstname,
            lastname: payload.lastname,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            role: payload.role,
            picture_url: payload.picture_url,
            credential,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.profiles.create(&profile).await?;
        tracing::info!("Profile {} registered", created.id);
        Ok(created)
    }

    pub async fn get_profile(&self, id: Uuid) -> AppResult<Profile> {
        self.repository.profiles.get_by_id(id).await
    }

    /// List profiles, or look one up by email
    pub async fn list_profiles(&self, query: &ProfileQuery) -> AppResult<Vec<Profile>> {
        if let Some(ref email) = query.email {
            let found = self.repository.profiles.find_by_email(email).await?;
            return Ok(found.into_iter().collect());
        }
        self.repository.profiles.list_all().await
    }

    /// Apply a profile edit; blank fields preserve stored values
    pub async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> AppResult<Profile> {
        let mut profile = self.repository.profiles.get_by_id(id).await?;

        if let Some(email) = non_blank(update.email) {
            if self.repository.profiles.email_exists(&email, Some(id)).await? {
                return Err(AppError::Conflict(
                    "A profile with this email already exists".to_string(),
                ));
            }
            profile.email = email;
        }
        if let Some(firstname) = non_blank(update.firstname) {
            profile.firstname = firstname;
        }
        if let Some(lastname) = non_blank(update.lastname) {
            profile.lastname = lastname;
        }
        if let Some(phone) = non_blank(update.phone) {
            profile.phone = Some(phone);
        }
        if let Some(address) = non_blank(update.address) {
            profile.address = Some(address);
        }
        if let Some(role) = non_blank(update.role) {
            profile.role = Some(role);
        }
        if let Some(url) = non_blank(update.picture_url) {
            profile.picture_url = Some(url);
        }

        self.repository.profiles.update(&profile).await
    }

    /// Delete a profile; false when it does not exist
    pub async fn delete_profile(&self, id: Uuid) -> AppResult<bool> {
        self.repository.profiles.delete(id).await
    }
}

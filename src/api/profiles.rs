//! Profile endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::profile::{CreateProfile, Profile, ProfileQuery, UpdateProfile},
};

use super::items::store_upload;

/// List profiles, or look one up by email
#[utoipa::path(
    get,
    path = "/profiles",
    tag = "profiles",
    params(
        ("email" = Option<String>, Query, description = "Exact email lookup")
    ),
    responses(
        (status = 200, description = "List of profiles", body = Vec<Profile>)
    )
)]
pub async fn list_profiles(
    State(state): State<crate::AppState>,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<Vec<Profile>>> {
    let profiles = state.services.profiles.list_profiles(&query).await?;
    Ok(Json(profiles))
}

/// Get profile by ID
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile details", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let profile = state.services.profiles.get_profile(id).await?;
    Ok(Json(profile))
}

/// Register a new profile
#[utoipa::path(
    post,
    path = "/profiles",
    tag = "profiles",
    request_body = CreateProfile,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_profile(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateProfile>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let created = state.services.profiles.create_profile(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a profile; blank fields preserve stored values
#[utoipa::path(
    put,
    path = "/profiles/{id}",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let updated = state.services.profiles.update_profile(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a profile
#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deleted = state.services.profiles.delete_profile(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Profile with id {} not found",
            id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a profile picture
#[utoipa::path(
    post,
    path = "/profiles/{id}/picture",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Picture stored", body = Profile),
        (status = 400, description = "No file in upload"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn upload_profile_picture(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Profile>> {
    let url = store_upload(&state, multipart, "profile").await?;
    let updated = state
        .services
        .profiles
        .update_profile(
            id,
            UpdateProfile {
                picture_url: Some(url),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(updated))
}

//! Item listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::item::{BorrowItem, CreateItem, Item, ItemQuery, UpdateItem},
};

/// List items, optionally filtered by owner or current borrower
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("owner_id" = Option<Uuid>, Query, description = "Filter by owner"),
        ("borrower_id" = Option<Uuid>, Query, description = "Filter by current borrower")
    ),
    responses(
        (status = 200, description = "List of items", body = Vec<Item>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.listings.list_items(&query).await?;
    Ok(Json(items))
}

/// Get item details by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Item>> {
    let item = state.services.listings.get_item(id).await?;
    Ok(Json(item))
}

/// Create a new item listing
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.listings.create_item(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing item; blank fields preserve stored values
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let updated = state.services.listings.update_item(id, payload).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct DeleteItemParams {
    pub force: Option<bool>,
}

/// Delete an item listing
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ("force" = Option<bool>, Query, description = "Delete even if currently lent")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item is currently lent")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteItemParams>,
) -> AppResult<StatusCode> {
    let deleted = state
        .services
        .listings
        .delete_item(id, params.force.unwrap_or(false))
        .await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Item with id {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Borrow an item directly, without an approval step
#[utoipa::path(
    post,
    path = "/items/{id}/borrow",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = BorrowItem,
    responses(
        (status = 200, description = "Item borrowed", body = Item),
        (status = 400, description = "Missing borrower"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item already lent")
    )
)]
pub async fn borrow_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BorrowItem>,
) -> AppResult<Json<Item>> {
    let item = state.services.lending.borrow_item(id, payload).await?;
    Ok(Json(item))
}

/// Return a borrowed item
#[utoipa::path(
    post,
    path = "/items/{id}/return",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item returned", body = Item),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item not currently lent")
    )
)]
pub async fn return_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Item>> {
    let item = state.services.lending.return_item(id).await?;
    Ok(Json(item))
}

/// Upload an item picture
#[utoipa::path(
    post,
    path = "/items/{id}/picture",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Picture stored", body = Item),
        (status = 400, description = "No file in upload"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn upload_item_picture(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Item>> {
    let url = store_upload(&state, multipart, "item").await?;
    let updated = state
        .services
        .listings
        .update_item(
            id,
            UpdateItem {
                picture_url: Some(url),
                ..Default::default()
            },
        )
        .await?;
    Ok(Json(updated))
}

/// Read the first file field of a multipart upload and hand it to blob
/// storage, returning the public URL.
pub(crate) async fn store_upload(
    state: &crate::AppState,
    mut multipart: Multipart,
    fallback_hint: &str,
) -> AppResult<String> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
        .ok_or_else(|| AppError::BadRequest("No file in upload".to_string()))?;

    let hint = field
        .file_name()
        .map(ToString::to_string)
        .unwrap_or_else(|| fallback_hint.to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?;

    state.services.storage.upload(&bytes, &hint).await
}

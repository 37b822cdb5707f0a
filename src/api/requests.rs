//! Borrow request endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::request::{BorrowRequest, CreateRequest, RequestDetails, RequestStatus, RespondRequest},
};

/// Response to an owner's accept/deny call
#[derive(Serialize, ToSchema)]
pub struct RespondResponse {
    pub status: RequestStatus,
}

/// Submit a borrow request for an item
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 200, description = "Request created", body = BorrowRequest),
        (status = 400, description = "Self-request or missing borrower"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item already lent")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateRequest>,
) -> AppResult<Json<BorrowRequest>> {
    let request = state.services.lending.submit_request(payload).await?;
    Ok(Json(request))
}

/// Get a borrow request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = BorrowRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRequest>> {
    let request = state.services.lending.get_request(id).await?;
    Ok(Json(request))
}

/// Pending requests for an owner's inbox
#[utoipa::path(
    get,
    path = "/requests/owner/{owner_id}",
    tag = "requests",
    params(
        ("owner_id" = Uuid, Path, description = "Owner profile ID")
    ),
    responses(
        (status = 200, description = "Pending requests", body = Vec<RequestDetails>)
    )
)]
pub async fn owner_inbox(
    State(state): State<crate::AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<RequestDetails>>> {
    let inbox = state.services.lending.inbox(owner_id).await?;
    Ok(Json(inbox))
}

/// Accept or deny a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/respond",
    tag = "requests",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Request resolved", body = RespondResponse),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already responded or item already lent")
    )
)]
pub async fn respond_request(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondRequest>,
) -> AppResult<Json<RespondResponse>> {
    let request = state.services.lending.respond(id, payload.accepted).await?;
    Ok(Json(RespondResponse {
        status: request.status,
    }))
}

//! Lending lifecycle service.
//!
//! The one place with real branching logic: it enforces the rules that span
//! the item and request registries. Each item moves `Available <-> Loaned`;
//! the loaned transition happens either directly (borrow endpoint) or through
//! the request flow (submit, then owner accepts). Both registries expose
//! conditional writes, so a lost race surfaces as Conflict here instead of a
//! double loan.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{BorrowItem, Item},
        request::{BorrowRequest, CreateRequest, NewBorrowRequest, RequestDetails, RequestStatus},
    },
    repository::{ItemStore, ProfileStore, RequestStore},
};

#[derive(Clone)]
pub struct LendingService {
    items: Arc<dyn ItemStore>,
    requests: Arc<dyn RequestStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl LendingService {
    pub fn new(
        items: Arc<dyn ItemStore>,
        requests: Arc<dyn RequestStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            items,
            requests,
            profiles,
        }
    }

    /// Borrow an item directly, without an approval step
    pub async fn borrow_item(&self, item_id: Uuid, payload: BorrowItem) -> AppResult<Item> {
        let borrower_id = payload
            .borrower_id
            .ok_or_else(|| AppError::BadRequest("borrower_id is required".to_string()))?;

        let item = self
            .items
            .mark_borrowed(item_id, borrower_id, Utc::now(), payload.due_at)
            .await?;

        tracing::info!("Item {} lent to {}", item.id, borrower_id);
        Ok(item)
    }

    /// Return a borrowed item, clearing all borrow fields
    pub async fn return_item(&self, item_id: Uuid) -> AppResult<Item> {
        let item = self.items.mark_returned(item_id).await?;
        tracing::info!("Item {} returned", item.id);
        Ok(item)
    }

    /// Submit a borrow request for an item.
    ///
    /// The item name and owner id are snapshotted onto the request at
    /// creation time; a later rename of the item leaves pending requests
    /// showing the old name.
    pub async fn submit_request(&self, payload: CreateRequest) -> AppResult<BorrowRequest> {
        let borrower_id = payload
            .borrower_id
            .ok_or_else(|| AppError::BadRequest("borrower_id is required".to_string()))?;

        let item = self.items.get_by_id(payload.item_id).await?;

        let owner = match self.profiles.get_by_id(item.owner_id).await {
            Ok(owner) => owner,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::BadRequest(format!(
                    "Item {} has no resolvable owner",
                    item.id
                )))
            }
            Err(e) => return Err(e),
        };

        if borrower_id == owner.id {
            return Err(AppError::BadRequest(
                "Cannot request to borrow your own item".to_string(),
            ));
        }

        if item.lent {
            return Err(AppError::Conflict(format!(
                "Item {} is already lent",
                item.id
            )));
        }

        let request = self
            .requests
            .create(&NewBorrowRequest {
                item_id: item.id,
                item_name: item.name.clone(),
                owner_id: owner.id,
                borrower_id,
                due_at: payload.due_at,
            })
            .await?;

        tracing::info!(
            "Request {} created: {} asks to borrow item {}",
            request.id,
            borrower_id,
            item.id
        );
        Ok(request)
    }

    /// Respond to a pending request.
    ///
    /// Accepting performs the `Available -> Loaned` transition on the item
    /// first and only then resolves the request, so an accept that loses the
    /// item race fails with Conflict and leaves the request pending.
    pub async fn respond(&self, request_id: Uuid, accepted: bool) -> AppResult<BorrowRequest> {
        let mut request = self.requests.get_by_id(request_id).await?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Request {} has already been responded to",
                request_id
            )));
        }

        if !accepted {
            if !self
                .requests
                .set_status_if_pending(request_id, RequestStatus::Denied)
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Request {} has already been responded to",
                    request_id
                )));
            }
            request.status = RequestStatus::Denied;
            tracing::info!("Request {} denied", request_id);
            return Ok(request);
        }

        // Item transition first; a concurrent accept for the same item loses
        // here and its request stays pending.
        self.items
            .mark_borrowed(request.item_id, request.borrower_id, Utc::now(), request.due_at)
            .await?;

        if !self
            .requests
            .set_status_if_pending(request_id, RequestStatus::Accepted)
            .await?
        {
            // Item already transitioned; only a concurrent response to this
            // same request can land here.
            tracing::error!(
                "Request {} resolved concurrently after item {} was lent",
                request_id,
                request.item_id
            );
            return Err(AppError::Conflict(format!(
                "Request {} has already been responded to",
                request_id
            )));
        }

        request.status = RequestStatus::Accepted;
        tracing::info!(
            "Request {} accepted: item {} lent to {}",
            request_id,
            request.item_id,
            request.borrower_id
        );
        Ok(request)
    }

    /// Get a borrow request by ID
    pub async fn get_request(&self, id: Uuid) -> AppResult<BorrowRequest> {
        self.requests.get_by_id(id).await
    }

    /// Pending requests for an owner's inbox, with borrower display names
    /// resolved
    pub async fn inbox(&self, owner_id: Uuid) -> AppResult<Vec<RequestDetails>> {
        let pending = self.requests.list_pending_for_owner(owner_id).await?;

        let borrower_ids: Vec<Uuid> = pending.iter().map(|r| r.borrower_id).collect();
        let profiles = self.profiles.get_many(&borrower_ids).await?;

        Ok(pending
            .into_iter()
            .map(|request| {
                let borrower_name = profiles
                    .get(&request.borrower_id)
                    .map(|p| p.display_name());
                RequestDetails {
                    request,
                    borrower_name,
                }
            })
            .collect())
    }
}

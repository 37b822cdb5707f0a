//! Item listing management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::item::{CreateItem, Item, ItemQuery, UpdateItem},
    repository::{ItemStore, ProfileStore, Repository},
};

/// Merge an update into an existing listing.
///
/// Blank incoming fields (absent, empty/whitespace strings, a zero price)
/// preserve the stored value. Borrow-state fields are never touched by owner
/// edits; only the lifecycle transitions write them.
fn merge_update(item: &mut Item, update: UpdateItem) {
    if let Some(name) = non_blank(update.name) {
        item.name = name;
    }
    if let Some(price) = update.price_per_day {
        if !price.is_zero() {
            item.price_per_day = price;
        }
    }
    if let Some(url) = non_blank(update.picture_url) {
        item.picture_url = Some(url);
    }
    if let Some(location) = non_blank(update.location) {
        item.location = Some(location);
    }
    if let Some(condition) = non_blank(update.condition) {
        item.condition = Some(condition);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Clone)]
pub struct ListingsService {
    repository: Repository,
}

impl ListingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new listing for an existing owner
    pub async fn create_item(&self, payload: CreateItem) -> AppResult<Item> {
        payload.validate()?;

        match self.repository.profiles.get_by_id(payload.owner_id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::BadRequest(format!(
                    "Owner profile {} does not exist",
                    payload.owner_id
                )))
            }
            Err(e) => return Err(e),
        }

        let item = self.repository.items.create(&payload).await?;
        tracing::info!("Item {} listed by {}", item.id, item.owner_id);
        Ok(item)
    }

    /// Get a listing by ID
    pub async fn get_item(&self, id: Uuid) -> AppResult<Item> {
        self.repository.items.get_by_id(id).await
    }

    /// List items, optionally filtered to an owner or a current borrower
    pub async fn list_items(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        if let Some(borrower_id) = query.borrower_id {
            return self.repository.items.list_by_borrower(borrower_id).await;
        }
        if let Some(owner_id) = query.owner_id {
            return self.repository.items.list_by_owner(owner_id).await;
        }
        self.repository.items.list_all().await
    }

    /// Apply an owner edit using the merge-by-presence policy
    pub async fn update_item(&self, id: Uuid, update: UpdateItem) -> AppResult<Item> {
        if let Some(ref price) = update.price_per_day {
            if price.is_sign_negative() {
                return Err(AppError::Validation(
                    "price_per_day must not be negative".to_string(),
                ));
            }
        }

        let mut item = self.repository.items.get_by_id(id).await?;
        merge_update(&mut item, update);
        self.repository.items.update(&item).await
    }

    /// Delete a listing. Lent items are refused unless `force` is set; on
    /// success the item's pending requests are denied rather than orphaned.
    pub async fn delete_item(&self, id: Uuid, force: bool) -> AppResult<bool> {
        let item = match self.repository.items.get_by_id(id).await {
            Ok(item) => item,
            Err(AppError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        if item.lent && !force {
            return Err(AppError::Conflict(format!(
                "Item {} is currently lent; pass force=true to delete anyway",
                id
            )));
        }

        let denied = self.repository.requests.deny_pending_for_item(id).await?;
        if denied > 0 {
            tracing::info!("Denied {} pending request(s) for deleted item {}", denied, id);
        }

        self.repository.items.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn listing(name: &str, price: Decimal) -> Item {
        let now = Utc::now();
        Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price_per_day: price,
            picture_url: Some("/media/abc.jpg".to_string()),
            location: Some("Oslo".to_string()),
            condition: Some("good".to_string()),
            owner_id: Uuid::new_v4(),
            lent: false,
            borrower_id: None,
            borrowed_on: None,
            due_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blank_fields_preserve_stored_values() {
        let mut item = listing("Drill", Decimal::new(500, 2));
        merge_update(
            &mut item,
            UpdateItem {
                name: Some("   ".to_string()),
                price_per_day: Some(Decimal::ZERO),
                picture_url: Some(String::new()),
                location: None,
                condition: Some(String::new()),
            },
        );

        assert_eq!(item.name, "Drill");
        assert_eq!(item.price_per_day, Decimal::new(500, 2));
        assert_eq!(item.picture_url.as_deref(), Some("/media/abc.jpg"));
        assert_eq!(item.location.as_deref(), Some("Oslo"));
        assert_eq!(item.condition.as_deref(), Some("good"));
    }

    #[test]
    fn present_fields_overwrite_stored_values() {
        let mut item = listing("Drill", Decimal::new(500, 2));
        merge_update(
            &mut item,
            UpdateItem {
                name: Some("Impact drill".to_string()),
                price_per_day: Some(Decimal::new(750, 2)),
                picture_url: None,
                location: Some("Bergen".to_string()),
                condition: Some("worn".to_string()),
            },
        );

        assert_eq!(item.name, "Impact drill");
        assert_eq!(item.price_per_day, Decimal::new(750, 2));
        assert_eq!(item.location.as_deref(), Some("Bergen"));
        assert_eq!(item.condition.as_deref(), Some("worn"));
    }

    #[test]
    fn merge_never_touches_borrow_state() {
        let mut item = listing("Drill", Decimal::new(500, 2));
        let borrower = Uuid::new_v4();
        item.lent = true;
        item.borrower_id = Some(borrower);
        item.borrowed_on = Some(Utc::now());

        merge_update(
            &mut item,
            UpdateItem {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        );

        assert!(item.lent);
        assert_eq!(item.borrower_id, Some(borrower));
        assert!(item.borrowed_on.is_some());
    }
}

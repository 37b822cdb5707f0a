//! Business logic services

pub mod lending;
pub mod listings;
pub mod profiles;
pub mod storage;

use std::sync::Arc;

use crate::{config::StorageConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lending: lending::LendingService,
    pub listings: listings::ListingsService,
    pub profiles: profiles::ProfilesService,
    pub storage: Arc<dyn storage::BlobStorage>,
    /// Kept for readiness probing against the shared pool
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, storage_config: StorageConfig) -> Self {
        Self {
            lending: lending::LendingService::new(
                Arc::new(repository.items.clone()),
                Arc::new(repository.requests.clone()),
                Arc::new(repository.profiles.clone()),
            ),
            listings: listings::ListingsService::new(repository.clone()),
            profiles: profiles::ProfilesService::new(repository.clone()),
            storage: Arc::new(storage::FsStorage::new(storage_config)),
            repository,
        }
    }
}

//! Blob storage for uploaded media

use std::path::Path;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// Storage collaborator for uploaded files; returns the public URL the blob
/// is served under.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(&self, bytes: &[u8], path_hint: &str) -> AppResult<String>;
}

/// Filesystem-backed blob storage. Files are content-addressed by SHA-256,
/// so re-uploading the same bytes yields the same URL.
pub struct FsStorage {
    config: StorageConfig,
}

impl FsStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BlobStorage for FsStorage {
    async fn upload(&self, bytes: &[u8], path_hint: &str) -> AppResult<String> {
        let digest = hex::encode(Sha256::digest(bytes));
        let extension = Path::new(path_hint)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        let filename = format!("{}{}", digest, extension);

        let root = Path::new(&self.config.media_root);
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create media directory: {}", e)))?;
        tokio::fs::write(root.join(&filename), bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write media file: {}", e)))?;

        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            filename
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> (FsStorage, std::path::PathBuf) {
        let root = std::env::temp_dir().join(format!("lendhub-media-{}", uuid::Uuid::new_v4()));
        let storage = FsStorage::new(StorageConfig {
            media_root: root.to_string_lossy().into_owned(),
            public_base_url: "/media".to_string(),
        });
        (storage, root)
    }

    #[tokio::test]
    async fn upload_is_content_addressed() {
        let (storage, root) = temp_storage();

        let url = storage.upload(b"picture-bytes", "drill.JPG").await.unwrap();
        assert!(url.starts_with("/media/"));
        assert!(url.ends_with(".jpg"));

        let filename = url.rsplit('/').next().unwrap();
        assert!(root.join(filename).exists());

        // Same bytes, same URL
        let again = storage.upload(b"picture-bytes", "other.jpg").await.unwrap();
        assert_eq!(url, again);

        tokio::fs::remove_dir_all(root).await.unwrap();
    }
}

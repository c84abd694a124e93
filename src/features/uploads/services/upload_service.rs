use std::sync::Arc;

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::modules::storage::{BlobStore, S3BlobStore};
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Hands uploaded files to the configured blob store.
///
/// When the backend is not configured the service still exists, and every
/// upload fails with the configuration error before any network call.
pub struct UploadService {
    backend: std::result::Result<Arc<dyn BlobStore>, String>,
}

impl UploadService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            backend: Ok(store),
        }
    }

    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Err(reason.into()),
        }
    }

    /// Build the S3 backend from configuration, creating the bucket if needed
    pub async fn from_config(config: std::result::Result<StorageConfig, String>) -> Self {
        let config = match config {
            Ok(config) => config,
            Err(reason) => {
                tracing::warn!("Uploads disabled: {}", reason);
                return Self::unconfigured(reason);
            }
        };

        match S3BlobStore::new(config) {
            Ok(store) => {
                store.ensure_bucket_exists().await;
                Self::new(Arc::new(store))
            }
            Err(e) => {
                tracing::warn!("Uploads disabled: {}", e);
                Self::unconfigured(e.to_string())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_ok()
    }

    pub async fn upload(&self, data: Vec<u8>, filename: &str) -> Result<UploadResponseDto> {
        let store = self
            .backend
            .as_ref()
            .map_err(|reason| AppError::Configuration(reason.clone()))?;

        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if data.len() > MAX_UPLOAD_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_UPLOAD_SIZE,
                MAX_UPLOAD_SIZE / 1024 / 1024
            )));
        }

        tracing::info!("Uploading {} ({} bytes)", filename, data.len());
        let blob = store.store(data, filename).await?;
        tracing::info!("Upload stored at {}", blob.url);

        Ok(blob.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryBlobStore;

    #[tokio::test]
    async fn test_unconfigured_backend_fails_fast() {
        let service = UploadService::from_config(Err(
            "UPLOAD_ENDPOINT environment variable not configured".to_string(),
        ))
        .await;

        assert!(!service.is_configured());
        let err = service.upload(b"bytes".to_vec(), "a.png").await.unwrap_err();
        match err {
            AppError::Configuration(msg) => {
                assert_eq!(msg, "UPLOAD_ENDPOINT environment variable not configured")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_reports_content_address() {
        let store = Arc::new(MemoryBlobStore::new(None));
        let service = UploadService::new(store.clone());

        let response = service.upload(b"hola".to_vec(), "saludo.txt").await.unwrap();

        assert!(response.success);
        assert_eq!(
            response.id,
            "b221d9dbb083a7f33428d7c2a3c3198ae925614d70210e28716ccaa7cd4ddb79"
        );
        assert_eq!(response.size, 4);
        assert_eq!(response.content_type, "text/plain");
        assert!(response.url.ends_with(&format!("{}.txt", response.id)));
        assert_eq!(store.object_count(), 1);
    }

    #[tokio::test]
    async fn test_quota_exceeded_is_distinct_from_failure() {
        let store = Arc::new(MemoryBlobStore::new(Some(6)));
        let service = UploadService::new(store.clone());

        service.upload(b"1234".to_vec(), "a.bin").await.unwrap();
        let err = service.upload(b"567".to_vec(), "b.bin").await.unwrap_err();

        assert!(matches!(err, AppError::QuotaExceeded(_)));
        assert_eq!(store.object_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_reupload_fits_a_full_quota() {
        let store = Arc::new(MemoryBlobStore::new(Some(4)));
        let service = UploadService::new(store.clone());

        let first = service.upload(b"1234".to_vec(), "a.bin").await.unwrap();
        let second = service.upload(b"1234".to_vec(), "a.bin").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.object_count(), 1);
    }

    #[tokio::test]
    async fn test_rejects_empty_and_oversized_files() {
        let store = Arc::new(MemoryBlobStore::new(None));
        let service = UploadService::new(store.clone());

        assert!(matches!(
            service.upload(Vec::new(), "a.png").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.upload(vec![0; MAX_UPLOAD_SIZE + 1], "a.png").await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(store.object_count(), 0);
    }
}

//! S3-compatible blob store (MinIO, AWS S3, ...)
//!
//! Uses the rust-s3 crate. Objects are content-addressed: the key is the
//! SHA-256 of the bytes under the configured prefix, so re-uploading the
//! same file overwrites an identical object.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::blob_store::{
    check_quota, content_id, key_prefix, object_key, usage_excluding, BlobStore, StoredBlob,
};
use crate::modules::storage::content_type::content_type_for;

pub struct S3BlobStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    public_endpoint: String,
    prefix: String,
    quota_bytes: Option<u64>,
}

impl S3BlobStore {
    /// Build the client. No network traffic happens here.
    pub fn new(config: StorageConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Configuration(format!("Invalid upload credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Configuration(format!("Invalid upload bucket: {}", e)))?;

        // Path-style URLs (http://endpoint/bucket) for MinIO
        bucket.set_path_style();

        info!(
            "Upload store configured for endpoint: {}, bucket: {}, prefix: {}",
            config.endpoint,
            bucket.name(),
            config.prefix
        );

        Ok(Self {
            bucket,
            region,
            credentials,
            public_endpoint: config.public_endpoint,
            prefix: config.prefix,
            quota_bytes: config.quota_bytes,
        })
    }

    /// Create the bucket if it does not exist. Failures are logged, not
    /// returned, so a missing permission does not stop startup.
    pub async fn ensure_bucket_exists(&self) {
        let result = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match result {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Total size of the objects under the prefix, not counting `key`
    async fn used_bytes(&self, key: &str) -> Result<u64> {
        let pages = self
            .bucket
            .list(key_prefix(&self.prefix), None)
            .await
            .map_err(|e| AppError::UploadFailed(format!("Failed to read storage usage: {}", e)))?;

        Ok(usage_excluding(
            pages
                .iter()
                .flat_map(|page| page.contents.iter())
                .map(|object| (object.key.as_str(), object.size)),
            key,
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn store(&self, data: Vec<u8>, filename: &str) -> Result<StoredBlob> {
        let size = data.len();
        let id = content_id(&data);
        let key = object_key(&self.prefix, &id, filename);

        if self.quota_bytes.is_some() {
            let used = self.used_bytes(&key).await?;
            check_quota(used, size as u64, self.quota_bytes)?;
        }

        let content_type = content_type_for(filename);

        let response = self
            .bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| AppError::UploadFailed(format!("Failed to upload '{}': {}", key, e)))?;

        if !(200..300).contains(&response.status_code()) {
            return Err(AppError::UploadFailed(format!(
                "Storage backend answered {} for '{}'",
                response.status_code(),
                key
            )));
        }

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());

        Ok(StoredBlob {
            url: self.public_url(&key),
            uri: format!("s3://{}/{}", self.bucket.name(), key),
            id,
            size,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig {
            endpoint: "http://127.0.0.1:9000".to_string(),
            public_endpoint: "https://media.turismoantigua.com".to_string(),
            access_key: "minio".to_string(),
            secret_key: "minio-secret".to_string(),
            bucket: "antigua-media".to_string(),
            region: "us-east-1".to_string(),
            prefix: "media".to_string(),
            quota_bytes: None,
        }
    }

    #[test]
    fn test_new_does_not_touch_network() {
        let store = S3BlobStore::new(config()).unwrap();
        assert_eq!(
            store.public_url("media/abc.png"),
            "https://media.turismoantigua.com/antigua-media/media/abc.png"
        );
    }
}

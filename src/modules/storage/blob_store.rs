use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::core::error::{AppError, Result};
use crate::modules::storage::content_type::extension_of;

/// Result of a successful store call
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    /// SHA-256 hex digest of the content
    pub id: String,
    /// Public HTTP URL
    pub url: String,
    /// Backend-native locator, e.g. `s3://bucket/key`
    pub uri: String,
    pub size: usize,
    pub content_type: &'static str,
}

/// Capability to store bytes and get back a retrievable URL
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, data: Vec<u8>, filename: &str) -> Result<StoredBlob>;
}

/// Content address of a blob
pub fn content_id(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Object key for a blob: `{prefix}/{id}.{ext}`, or `{prefix}/{id}` when
/// the filename has no usable extension
pub fn object_key(prefix: &str, id: &str, filename: &str) -> String {
    let name = match extension_of(filename) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    };

    format!("{}{}", key_prefix(prefix), name)
}

/// Leading part shared by every key [`object_key`] builds under `prefix`.
/// Used as the listing prefix when summing storage usage.
pub fn key_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!("{}/", prefix)
    }
}

/// Bytes already stored, minus any object at `key`. Keys are content
/// addresses, so an upload to an existing key replaces identical bytes.
pub fn usage_excluding<'a, I>(objects: I, key: &str) -> u64
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    objects
        .into_iter()
        .filter(|(existing, _)| *existing != key)
        .map(|(_, size)| size)
        .sum()
}

/// Reject an upload that would push usage past the quota
pub fn check_quota(used: u64, incoming: u64, quota: Option<u64>) -> Result<()> {
    let Some(quota) = quota else {
        return Ok(());
    };

    if used.saturating_add(incoming) > quota {
        return Err(AppError::QuotaExceeded(format!(
            "Need {} bytes, {} of {} bytes available",
            incoming,
            quota.saturating_sub(used),
            quota
        )));
    }

    Ok(())
}

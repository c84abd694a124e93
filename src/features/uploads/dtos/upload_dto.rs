use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::storage::StoredBlob;

/// Multipart form for uploads (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFormDto {
    /// The file to upload, at most 10 MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a stored upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub success: bool,
    /// Public URL of the stored file
    pub url: String,
    /// SHA-256 of the content
    pub id: String,
    /// Backend-native locator of the stored file
    pub ar_url: String,
    pub size: usize,
    pub content_type: String,
}

impl From<StoredBlob> for UploadResponseDto {
    fn from(blob: StoredBlob) -> Self {
        Self {
            success: true,
            url: blob.url,
            id: blob.id,
            ar_url: blob.uri,
            size: blob.size,
            content_type: blob.content_type.to_string(),
        }
    }
}

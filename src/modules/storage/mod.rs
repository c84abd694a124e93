//! Storage module for uploaded media
//!
//! Provides the blob store capability used by uploads and its
//! S3-compatible implementation.

mod blob_store;
mod content_type;
mod s3_store;

pub use blob_store::{check_quota, content_id, object_key, usage_excluding, BlobStore, StoredBlob};
pub use content_type::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use s3_store::S3BlobStore;

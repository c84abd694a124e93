use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::upload_file;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Create routes for the uploads feature; the caller adds the session layer
pub fn routes(service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/api/upload",
            // Allow body size up to MAX_UPLOAD_SIZE + buffer for multipart overhead
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}

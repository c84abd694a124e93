use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::uploads::dtos::{UploadFormDto, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ErrorResponse;

/// Upload a media file
///
/// Accepts multipart/form-data with a single `file` field.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(
        content = UploadFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "File stored", body = UploadResponseDto),
        (status = 400, description = "Missing file, file too large or quota exceeded", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Upload backend not configured or failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_file(
    user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some("file") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        file = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    debug!("Upload of {} requested by {}", file_name, user.sub);
    let response = service.upload(data, &file_name).await?;
    Ok(Json(response))
}

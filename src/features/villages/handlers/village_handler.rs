use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::villages::dtos::{ListVillagesQuery, UpsertVillageDto, VillageResponseDto};
use crate::features::villages::normalization::VillageStatus;
use crate::features::villages::services::VillageService;
use crate::shared::types::{DeletedResponse, ErrorResponse, Vocabulary};

/// List villages
///
/// Always answers 200. When the store is unreachable the response is the
/// built-in fallback dataset.
#[utoipa::path(
    get,
    path = "/api/villages",
    params(ListVillagesQuery),
    responses(
        (status = 200, description = "Villages in id order", body = Vec<VillageResponseDto>),
        (status = 400, description = "Unknown status filter", body = ErrorResponse)
    ),
    tag = "villages"
)]
pub async fn list_villages(
    State(service): State<Arc<VillageService>>,
    AppQuery(query): AppQuery<ListVillagesQuery>,
) -> Result<Json<Vec<VillageResponseDto>>> {
    let status = VillageStatus::parse_optional(query.status.as_deref())?;
    Ok(Json(service.list(status).await))
}

/// Get a village by id
#[utoipa::path(
    get,
    path = "/api/villages/{id}",
    params(
        ("id" = i64, Path, description = "Village id")
    ),
    responses(
        (status = 200, description = "Village found", body = VillageResponseDto),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Village not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "villages"
)]
pub async fn get_village(
    State(service): State<Arc<VillageService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<VillageResponseDto>> {
    Ok(Json(service.get(id).await?))
}

/// Get a published village by slug
#[utoipa::path(
    get,
    path = "/api/villages/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Village slug")
    ),
    responses(
        (status = 200, description = "Village found", body = VillageResponseDto),
        (status = 404, description = "Village not found", body = ErrorResponse)
    ),
    tag = "villages"
)]
pub async fn get_village_by_slug(
    State(service): State<Arc<VillageService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<VillageResponseDto>> {
    Ok(Json(service.get_by_slug(&slug).await?))
}

/// Create a village
#[utoipa::path(
    post,
    path = "/api/villages",
    request_body = UpsertVillageDto,
    responses(
        (status = 201, description = "Village created", body = VillageResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "villages"
)]
pub async fn create_village(
    user: AuthenticatedUser,
    State(service): State<Arc<VillageService>>,
    AppJson(dto): AppJson<UpsertVillageDto>,
) -> Result<(StatusCode, Json<VillageResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Village create requested by {}", user.sub);
    let village = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(village)))
}

/// Replace a village
///
/// The body is the full record. Omitted fields are reset to their defaults.
#[utoipa::path(
    put,
    path = "/api/villages/{id}",
    params(
        ("id" = i64, Path, description = "Village id")
    ),
    request_body = UpsertVillageDto,
    responses(
        (status = 200, description = "Village replaced", body = VillageResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Village not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "villages"
)]
pub async fn update_village(
    user: AuthenticatedUser,
    State(service): State<Arc<VillageService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpsertVillageDto>,
) -> Result<Json<VillageResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Village {} update requested by {}", id, user.sub);
    Ok(Json(service.update(id, dto).await?))
}

/// Delete a village
#[utoipa::path(
    delete,
    path = "/api/villages/{id}",
    params(
        ("id" = i64, Path, description = "Village id")
    ),
    responses(
        (status = 200, description = "Village deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Village not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "villages"
)]
pub async fn delete_village(
    user: AuthenticatedUser,
    State(service): State<Arc<VillageService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeletedResponse>> {
    tracing::debug!("Village {} delete requested by {}", id, user.sub);
    service.delete(id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}

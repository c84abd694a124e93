use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::events::{handlers as events_handlers, models as events_models};
use crate::features::tours::{handlers as tours_handlers, models as tours_models};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::features::villages::{
    dtos as villages_dtos, handlers as villages_handlers, models as villages_models,
    normalization as villages_normalization,
};
use crate::shared::types::{DeletedResponse, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::get_me,
        // Villages
        villages_handlers::list_villages,
        villages_handlers::get_village,
        villages_handlers::get_village_by_slug,
        villages_handlers::create_village,
        villages_handlers::update_village,
        villages_handlers::delete_village,
        // Tours
        tours_handlers::list_tours,
        tours_handlers::get_tour,
        // Events
        events_handlers::list_events,
        events_handlers::get_event,
        // Uploads
        uploads_handlers::upload_file,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            DeletedResponse,
            // Auth
            auth_model::AuthenticatedUser,
            auth_dtos::LoginRequestDto,
            auth_dtos::SessionResponseDto,
            // Villages
            villages_normalization::VillageStatus,
            villages_normalization::VillageCategory,
            villages_models::Location,
            villages_models::RoadAccess,
            villages_models::Infrastructure,
            villages_dtos::UpsertVillageDto,
            villages_dtos::VillageResponseDto,
            villages_dtos::VillageCountsDto,
            // Tours
            tours_models::TourCategory,
            tours_models::TourDifficulty,
            tours_models::Tour,
            // Events
            events_models::EventCategory,
            events_models::EntryType,
            events_models::Event,
            // Uploads
            uploads_dtos::UploadFormDto,
            uploads_dtos::UploadResponseDto,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin session"),
        (name = "villages", description = "Village directory (reads public, writes admin only)"),
        (name = "tours", description = "Tour catalog (public)"),
        (name = "events", description = "Event calendar (public)"),
        (name = "uploads", description = "Media uploads (admin only)"),
        (name = "dashboard", description = "Admin dashboard summary"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Antigua Turismo API",
        version = "0.1.0",
        description = "Villages, tours and events of La Antigua Guatemala",
    )
)]
pub struct ApiDoc;

/// Adds the admin session bearer scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/auth/login",
            "/api/villages",
            "/api/villages/{id}",
            "/api/villages/slug/{slug}",
            "/api/tours",
            "/api/tours/{id}",
            "/api/events",
            "/api/events/{id}",
            "/api/upload",
            "/api/dashboard/summary",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Portal".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Portal");
        assert_eq!(doc.info.version, "9.9.9");
    }
}

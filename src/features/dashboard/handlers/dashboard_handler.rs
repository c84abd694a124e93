use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ErrorResponse;

/// Get the admin dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummaryDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<DashboardSummaryDto>, AppError> {
    let summary = service.get_summary(Utc::now().date_naive()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use crate::features::dashboard::{routes, DashboardService};
    use crate::features::events::EventCatalog;
    use crate::features::tours::TourCatalog;
    use crate::features::uploads::UploadService;
    use crate::features::villages::VillageService;
    use crate::shared::test_helpers::{
        admin_token, protect, test_session_service, MemoryBlobStore, MemoryVillageStore,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::Arc;

    fn server() -> (TestServer, String) {
        let tours = Arc::new(TourCatalog::load(None).unwrap());
        let villages = Arc::new(VillageService::new(
            Arc::new(MemoryVillageStore::default()),
            tours.clone(),
        ));
        let service = Arc::new(DashboardService::new(
            villages,
            tours,
            Arc::new(EventCatalog::load(None).unwrap()),
            Arc::new(UploadService::new(Arc::new(MemoryBlobStore::new(None)))),
        ));
        let sessions = test_session_service();
        let token = admin_token(&sessions);

        let app = protect(routes(service), sessions);
        (TestServer::new(app).unwrap(), token)
    }

    #[tokio::test]
    async fn test_summary_requires_session() {
        let (server, _) = server();

        server
            .get("/api/dashboard/summary")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_summary_with_session() {
        let (server, token) = server();

        let response = server
            .get("/api/dashboard/summary")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["villages"]["total"], 0);
        assert_eq!(body["tours"], 8);
        assert_eq!(body["events"], 6);
        assert_eq!(body["uploadsEnabled"], true);
    }
}

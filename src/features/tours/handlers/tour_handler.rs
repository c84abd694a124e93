use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::tours::dtos::ListToursQuery;
use crate::features::tours::models::{Tour, TourCategory};
use crate::features::tours::services::TourCatalog;
use crate::shared::types::{ErrorResponse, Vocabulary};

/// List tours
#[utoipa::path(
    get,
    path = "/api/tours",
    params(ListToursQuery),
    responses(
        (status = 200, description = "Tours in id order", body = Vec<Tour>),
        (status = 400, description = "Unknown category", body = ErrorResponse)
    ),
    tag = "tours"
)]
pub async fn list_tours(
    State(catalog): State<Arc<TourCatalog>>,
    AppQuery(query): AppQuery<ListToursQuery>,
) -> Result<Json<Vec<Tour>>> {
    let category = TourCategory::parse_optional(query.category.as_deref())?;
    Ok(Json(catalog.search(category, query.q.as_deref())))
}

/// Get a tour by id
#[utoipa::path(
    get,
    path = "/api/tours/{id}",
    params(
        ("id" = i64, Path, description = "Tour id")
    ),
    responses(
        (status = 200, description = "Tour found", body = Tour),
        (status = 404, description = "Tour not found", body = ErrorResponse)
    ),
    tag = "tours"
)]
pub async fn get_tour(
    State(catalog): State<Arc<TourCatalog>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Tour>> {
    Ok(Json(catalog.get(id)?))
}

#[cfg(test)]
mod tests {
    use crate::features::tours::{routes, TourCatalog};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let catalog = Arc::new(TourCatalog::load(None).unwrap());
        TestServer::new(routes(catalog)).unwrap()
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let response = server()
            .get("/api/tours")
            .add_query_param("category", "gastronomic")
            .await;

        response.assert_status_ok();
        let tours: Vec<Value> = response.json();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0]["title"], "Ruta Gastronómica Colonial");
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_category() {
        let response = server()
            .get("/api/tours")
            .add_query_param("category", "space")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_tour() {
        let response = server().get("/api/tours/404").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Tour not found" }));
    }

    #[tokio::test]
    async fn test_get_tour_with_bad_id() {
        server()
            .get("/api/tours/abc")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tours::handlers;
use crate::features::tours::services::TourCatalog;

/// Create routes for the tours feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(catalog: Arc<TourCatalog>) -> Router {
    Router::new()
        .route("/api/tours", get(handlers::list_tours))
        .route("/api/tours/{id}", get(handlers::get_tour))
        .with_state(catalog)
}

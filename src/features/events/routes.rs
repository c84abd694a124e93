use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers;
use crate::features::events::services::EventCatalog;

/// Create routes for the events feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(catalog: Arc<EventCatalog>) -> Router {
    Router::new()
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/{id}", get(handlers::get_event))
        .with_state(catalog)
}

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::villages::handlers;
use crate::features::villages::services::VillageService;

/// Read routes used by the public site
pub fn public_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", get(handlers::list_villages))
        .route("/api/villages/{id}", get(handlers::get_village))
        .route(
            "/api/villages/slug/{slug}",
            get(handlers::get_village_by_slug),
        )
        .with_state(service)
}

/// Write routes; the caller wraps them in the session layer
pub fn admin_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", post(handlers::create_village))
        .route(
            "/api/villages/{id}",
            put(handlers::update_village).delete(handlers::delete_village),
        )
        .with_state(service)
}

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::events::dtos::ListEventsQuery;
use crate::features::events::models::{Event, EventCategory};
use crate::features::events::services::{EventCatalog, EventFilter};
use crate::shared::types::{ErrorResponse, Vocabulary};

/// List events in date order
#[utoipa::path(
    get,
    path = "/api/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Events sorted by date", body = Vec<Event>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(catalog): State<Arc<EventCatalog>>,
    AppQuery(query): AppQuery<ListEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let filter = EventFilter {
        category: EventCategory::parse_optional(query.category.as_deref())?,
        q: query.q,
        featured: query.featured,
        from: query
            .upcoming
            .filter(|upcoming| *upcoming)
            .map(|_| Utc::now().date_naive()),
    };

    Ok(Json(catalog.search(&filter)))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(catalog): State<Arc<EventCatalog>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Event>> {
    Ok(Json(catalog.get(id)?))
}

#[cfg(test)]
mod tests {
    use crate::features::events::models::Event;
    use crate::features::events::{routes, EventCatalog};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn server() -> TestServer {
        let catalog = Arc::new(EventCatalog::load(None).unwrap());
        TestServer::new(routes(catalog)).unwrap()
    }

    #[tokio::test]
    async fn test_list_featured_events() {
        let response = server()
            .get("/api/events")
            .add_query_param("featured", "true")
            .await;

        response.assert_status_ok();
        let events: Vec<Event> = response.json();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.featured));
    }

    #[tokio::test]
    async fn test_upcoming_excludes_past_events() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let raw = json!([
            {"id": 1, "title": "Pasado", "description": "", "image": "", "date": "2020-01-01",
             "time": "10:00", "location": "Antigua", "category": "festival"},
            {"id": 2, "title": "Futuro", "description": "", "image": "", "date": tomorrow,
             "time": "10:00", "location": "Antigua", "category": "festival"}
        ]);
        let catalog = Arc::new(EventCatalog::from_json(&raw.to_string()).unwrap());
        let server = TestServer::new(routes(catalog)).unwrap();

        let response = server
            .get("/api/events")
            .add_query_param("upcoming", "true")
            .await;

        let events: Vec<Event> = response.json();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Futuro");
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_category() {
        server()
            .get("/api/events")
            .add_query_param("category", "concert")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_event() {
        let response = server().get("/api/events/3").await;
        response.assert_status_ok();
        let event: Event = response.json();
        assert_eq!(event.title, "Festival del Café");
        assert_eq!(event.date.to_string(), "2024-11-15");
    }

    #[tokio::test]
    async fn test_get_missing_event() {
        let response = server().get("/api/events/99").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Event not found" }));
    }
}

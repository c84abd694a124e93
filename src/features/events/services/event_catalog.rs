use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::events::models::{Event, EventCategory};
use crate::shared::types::normalize_search;

const BUNDLED_EVENTS: &str = include_str!("../../../../data/events.json");

/// Filters accepted by [`EventCatalog::search`]
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub q: Option<String>,
    pub featured: Option<bool>,
    /// Keep only events on or after this date
    pub from: Option<NaiveDate>,
}

/// Read-only event catalog, kept in date order
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// Load from a JSON file, or from the bundled dataset when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let catalog = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read events from {}", path.display()))?;
                Self::from_json(&raw)
                    .with_context(|| format!("Invalid events document {}", path.display()))?
            }
            None => Self::from_json(BUNDLED_EVENTS).context("Invalid bundled events document")?,
        };

        tracing::info!("Loaded {} events", catalog.events.len());
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let events: Vec<Event> = serde_json::from_str(raw)?;
        Ok(Self::new(events))
    }

    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Self { events }
    }

    pub fn search(&self, filter: &EventFilter) -> Vec<Event> {
        let term = normalize_search(filter.q.as_deref());

        self.events
            .iter()
            .filter(|e| filter.category.map_or(true, |c| e.category == c))
            .filter(|e| filter.featured.map_or(true, |f| e.featured == f))
            .filter(|e| filter.from.map_or(true, |from| e.date >= from))
            .filter(|e| {
                term.as_deref().map_or(true, |term| {
                    e.title.to_lowercase().contains(term)
                        || e.location.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Result<Event> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> EventCatalog {
        EventCatalog::load(None).unwrap()
    }

    fn ids(events: &[Event]) -> Vec<i64> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_bundled_events_are_sorted_by_date() {
        let events = bundled().search(&EventFilter::default());
        assert_eq!(ids(&events), vec![1, 2, 6, 5, 3, 4]);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_empty_document_gives_empty_catalog() {
        assert!(!bundled().is_empty());
        assert!(EventCatalog::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_mixed_event_shapes_deserialize() {
        let catalog = bundled();
        let procession = catalog.get(1).unwrap();
        assert_eq!(procession.community_involvement.len(), 4);
        assert_eq!(procession.price, None);

        let coffee = catalog.get(3).unwrap();
        assert_eq!(coffee.price, Some(35));
        assert!(coffee.community_involvement.is_empty());
    }

    #[test]
    fn test_featured_filter() {
        let featured = bundled().search(&EventFilter {
            featured: Some(true),
            ..Default::default()
        });
        assert_eq!(ids(&featured), vec![1, 2, 5]);
    }

    #[test]
    fn test_upcoming_filter_is_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let upcoming = bundled().search(&EventFilter {
            from: Some(from),
            ..Default::default()
        });
        assert_eq!(ids(&upcoming), vec![3, 4]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let events = bundled().search(&EventFilter {
            category: Some(EventCategory::Religious),
            q: Some("centro histórico".to_string()),
            ..Default::default()
        });
        assert_eq!(ids(&events), vec![1, 2]);
    }

    #[test]
    fn test_missing_event_is_not_found() {
        assert!(matches!(bundled().get(42), Err(AppError::NotFound(_))));
    }
}

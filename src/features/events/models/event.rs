use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Festival,
    Cultural,
    Religious,
    Gastronomic,
    Artisan,
}

impl Vocabulary for EventCategory {
    const KIND: &'static str = "event category";
    const ALL: &'static [Self] = &[
        EventCategory::Festival,
        EventCategory::Cultural,
        EventCategory::Religious,
        EventCategory::Gastronomic,
        EventCategory::Artisan,
    ];

    fn as_str(self) -> &'static str {
        match self {
            EventCategory::Festival => "festival",
            EventCategory::Cultural => "cultural",
            EventCategory::Religious => "religious",
            EventCategory::Gastronomic => "gastronomic",
            EventCategory::Artisan => "artisan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Free,
    Donation,
    Registration,
}

/// A scheduled event from the read-only catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    #[schema(value_type = String, format = Date, example = "2024-11-01")]
    pub date: NaiveDate,
    /// Local start time, `HH:MM`
    pub time: String,
    pub location: String,
    pub category: EventCategory,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Whole quetzales; 0 means free entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets_available: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_significance: Option<String>,
    #[serde(default)]
    pub community_involvement: Vec<String>,
}

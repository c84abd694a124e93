use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Geographic placement of a village, stored as a JSONB document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lng: f64,
    /// Free text, e.g. "5 km de Antigua"
    pub distance: String,
    pub municipality: Option<String>,
    pub department: Option<String>,
    pub elevation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoadAccess {
    Paved,
    Unpaved,
    Trail,
}

/// Basic services available in a village, stored as a JSONB document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Infrastructure {
    pub has_school: bool,
    pub has_health_center: bool,
    pub has_electricity: bool,
    pub has_water: bool,
    pub road_access: Option<RoadAccess>,
}

/// Row of the `villages` table
#[derive(Debug, Clone, FromRow)]
pub struct VillageRecord {
    pub id: i64,
    pub name: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub short_desc: String,
    pub short_desc_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub images: Vec<String>,
    pub location: Json<Location>,
    pub highlights: Vec<String>,
    pub highlights_en: Vec<String>,
    pub population: Option<i32>,
    pub founded_year: Option<i32>,
    pub status: String,
    pub category: String,
    pub main_activities: Vec<String>,
    pub main_activities_en: Vec<String>,
    pub cultural_significance: String,
    pub cultural_significance_en: Option<String>,
    pub infrastructure: Json<Infrastructure>,
    pub languages: Vec<String>,
    pub languages_en: Vec<String>,
    pub economic_activities: Vec<String>,
    pub economic_activities_en: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully defaulted column values for an insert or a whole-record replace.
/// `status` and `category` already hold store tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct VillageDraft {
    pub name: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub short_desc: String,
    pub short_desc_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub images: Vec<String>,
    pub location: Location,
    pub highlights: Vec<String>,
    pub highlights_en: Vec<String>,
    pub population: Option<i32>,
    pub founded_year: Option<i32>,
    pub status: &'static str,
    pub category: &'static str,
    pub main_activities: Vec<String>,
    pub main_activities_en: Vec<String>,
    pub cultural_significance: String,
    pub cultural_significance_en: Option<String>,
    pub infrastructure: Infrastructure,
    pub languages: Vec<String>,
    pub languages_en: Vec<String>,
    pub economic_activities: Vec<String>,
    pub economic_activities_en: Vec<String>,
}

impl VillageRecord {
    /// Materialize a draft as a row, as the store would after a write
    pub fn from_draft(
        id: i64,
        draft: VillageDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            name_en: draft.name_en,
            slug: draft.slug,
            short_desc: draft.short_desc,
            short_desc_en: draft.short_desc_en,
            description: draft.description,
            description_en: draft.description_en,
            images: draft.images,
            location: Json(draft.location),
            highlights: draft.highlights,
            highlights_en: draft.highlights_en,
            population: draft.population,
            founded_year: draft.founded_year,
            status: draft.status.to_string(),
            category: draft.category.to_string(),
            main_activities: draft.main_activities,
            main_activities_en: draft.main_activities_en,
            cultural_significance: draft.cultural_significance,
            cultural_significance_en: draft.cultural_significance_en,
            infrastructure: Json(draft.infrastructure),
            languages: draft.languages,
            languages_en: draft.languages_en,
            economic_activities: draft.economic_activities,
            economic_activities_en: draft.economic_activities_en,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_tolerates_partial_document() {
        let location: Location = serde_json::from_str(r#"{"lat": 14.53, "lng": -90.73}"#).unwrap();
        assert_eq!(location.distance, "");
        assert_eq!(location.municipality, None);

        let empty: Location = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Location::default());
    }

    #[test]
    fn test_infrastructure_uses_camel_case() {
        let infra = Infrastructure {
            has_health_center: true,
            road_access: Some(RoadAccess::Unpaved),
            ..Default::default()
        };
        let value = serde_json::to_value(&infra).unwrap();
        assert_eq!(value["hasHealthCenter"], true);
        assert_eq!(value["roadAccess"], "unpaved");
    }

    #[test]
    fn test_location_rejects_out_of_range_coordinates() {
        let location = Location {
            lat: 91.0,
            lng: -90.7,
            ..Default::default()
        };
        assert!(location.validate().is_err());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::villages::models::{Infrastructure, Location, VillageRecord};
use crate::features::villages::normalization::{
    category_from_store, status_from_store, InvalidEnum, VillageCategory, VillageStatus,
};

/// Query parameters for listing villages
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListVillagesQuery {
    /// Restrict to one publication state (`active` or `draft`)
    #[param(example = "active")]
    pub status: Option<String>,
}

/// Request body for creating or replacing a village.
///
/// Every field but `name` is optional. Omitted fields take their defaults
/// on both create and update, since an update replaces the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpsertVillageDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    pub name_en: Option<String>,
    /// Derived from `name` when omitted
    #[validate(length(max = 200, message = "Slug must be at most 200 characters"))]
    pub slug: Option<String>,
    pub short_desc: Option<String>,
    pub short_desc_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub images: Option<Vec<String>>,
    #[validate(nested)]
    pub location: Option<Location>,
    pub highlights: Option<Vec<String>>,
    pub highlights_en: Option<Vec<String>>,
    #[validate(range(min = 0, message = "Population cannot be negative"))]
    pub population: Option<i32>,
    pub founded_year: Option<i32>,
    /// `active` or `draft` (default)
    #[schema(example = "draft")]
    pub status: Option<String>,
    /// `cultural` (default), `artisan`, `nature`, `agricultural` or `historical`
    #[schema(example = "cultural")]
    pub category: Option<String>,
    pub main_activities: Option<Vec<String>>,
    pub main_activities_en: Option<Vec<String>>,
    pub cultural_significance: Option<String>,
    pub cultural_significance_en: Option<String>,
    pub infrastructure: Option<Infrastructure>,
    pub languages: Option<Vec<String>>,
    pub languages_en: Option<Vec<String>>,
    pub economic_activities: Option<Vec<String>>,
    pub economic_activities_en: Option<Vec<String>>,
}

/// Village as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillageResponseDto {
    pub id: i64,
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
    pub status: VillageStatus,
    pub category: VillageCategory,
    pub main_activities: Vec<String>,
    pub main_activities_en: Vec<String>,
    pub cultural_significance: String,
    pub cultural_significance_en: Option<String>,
    pub infrastructure: Infrastructure,
    pub languages: Vec<String>,
    pub languages_en: Vec<String>,
    pub economic_activities: Vec<String>,
    pub economic_activities_en: Vec<String>,
    /// Number of catalog tours that take place in this village
    pub tours: usize,
    #[schema(value_type = String, format = Date, example = "2024-08-04")]
    pub created_at: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-08-04")]
    pub updated_at: NaiveDate,
}

impl VillageResponseDto {
    /// Normalize a stored row. Fails only if the row holds a category token
    /// outside the known vocabulary.
    pub fn from_record(record: VillageRecord, tours: usize) -> Result<Self, InvalidEnum> {
        let category = category_from_store(&record.category)?;

        Ok(Self {
            id: record.id,
            name: record.name,
            name_en: record.name_en,
            slug: record.slug,
            short_desc: record.short_desc,
            short_desc_en: record.short_desc_en,
            description: record.description,
            description_en: record.description_en,
            images: record.images,
            location: record.location.0,
            highlights: record.highlights,
            highlights_en: record.highlights_en,
            population: record.population,
            founded_year: record.founded_year,
            status: status_from_store(&record.status),
            category,
            main_activities: record.main_activities,
            main_activities_en: record.main_activities_en,
            cultural_significance: record.cultural_significance,
            cultural_significance_en: record.cultural_significance_en,
            infrastructure: record.infrastructure.0,
            languages: record.languages,
            languages_en: record.languages_en,
            economic_activities: record.economic_activities,
            economic_activities_en: record.economic_activities_en,
            tours,
            created_at: record.created_at.date_naive(),
            updated_at: record.updated_at.date_naive(),
        })
    }
}

/// Village counts per publication state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillageCountsDto {
    pub total: i64,
    pub active: i64,
    pub draft: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_requires_name() {
        let dto: UpsertVillageDto = serde_json::from_str(r#"{"shortDesc": "desc"}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpsertVillageDto = serde_json::from_str(r#"{"name": "Test"}"#).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_upsert_rejects_negative_population() {
        let dto = UpsertVillageDto {
            name: "Test".to_string(),
            population: Some(-1),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_upsert_accepts_any_founded_year() {
        for year in [-500, 900, 1524, 2300] {
            let dto = UpsertVillageDto {
                name: "Test".to_string(),
                founded_year: Some(year),
                ..Default::default()
            };
            assert!(dto.validate().is_ok(), "year {}", year);
        }
    }

    #[test]
    fn test_upsert_validates_nested_location() {
        let dto: UpsertVillageDto = serde_json::from_str(
            r#"{"name": "Test", "location": {"lat": 14.5, "lng": -200.0, "distance": ""}}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }
}

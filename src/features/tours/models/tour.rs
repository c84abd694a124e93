use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TourCategory {
    Cultural,
    Adventure,
    Gastronomic,
    Artisan,
    Nature,
}

impl Vocabulary for TourCategory {
    const KIND: &'static str = "tour category";
    const ALL: &'static [Self] = &[
        TourCategory::Cultural,
        TourCategory::Adventure,
        TourCategory::Gastronomic,
        TourCategory::Artisan,
        TourCategory::Nature,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TourCategory::Cultural => "cultural",
            TourCategory::Adventure => "adventure",
            TourCategory::Gastronomic => "gastronomic",
            TourCategory::Artisan => "artisan",
            TourCategory::Nature => "nature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TourDifficulty {
    Easy,
    Moderate,
    Difficult,
}

/// A guided tour from the read-only catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Free text, e.g. "8 horas"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<TourDifficulty>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub category: TourCategory,
    /// Village or site name where the tour takes place
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<String>,
}

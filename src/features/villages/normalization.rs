//! Mapping between the store's enum tokens and the API's vocabulary.
//!
//! The `villages` table keeps status and category as uppercase tokens
//! (`ACTIVE`, `ARTISAN`, ...). The API speaks lowercase (`active`,
//! `artisan`, ...). Strict parsers are used on the request path. The
//! lenient `*_to_store` helpers keep the legacy importer's behavior of
//! coercing unknown input to a default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::shared::types::InvalidEnum;
use crate::shared::types::Vocabulary;

pub const STORE_ACTIVE: &str = "ACTIVE";
pub const STORE_DRAFT: &str = "DRAFT";

/// Publication state; only `Active` villages are shown on the public site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VillageStatus {
    Active,
    #[default]
    Draft,
}

impl VillageStatus {
    pub fn store_token(self) -> &'static str {
        match self {
            VillageStatus::Active => STORE_ACTIVE,
            VillageStatus::Draft => STORE_DRAFT,
        }
    }
}

impl Vocabulary for VillageStatus {
    const KIND: &'static str = "status";
    const ALL: &'static [Self] = &[VillageStatus::Active, VillageStatus::Draft];

    fn as_str(self) -> &'static str {
        match self {
            VillageStatus::Active => "active",
            VillageStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for VillageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VillageStatus {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}

/// Closed set of village classifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VillageCategory {
    #[default]
    Cultural,
    Artisan,
    Nature,
    Agricultural,
    Historical,
}

impl VillageCategory {
    pub fn store_token(self) -> &'static str {
        match self {
            VillageCategory::Cultural => "CULTURAL",
            VillageCategory::Artisan => "ARTISAN",
            VillageCategory::Nature => "NATURE",
            VillageCategory::Agricultural => "AGRICULTURAL",
            VillageCategory::Historical => "HISTORICAL",
        }
    }
}

impl Vocabulary for VillageCategory {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        VillageCategory::Cultural,
        VillageCategory::Artisan,
        VillageCategory::Nature,
        VillageCategory::Agricultural,
        VillageCategory::Historical,
    ];

    fn as_str(self) -> &'static str {
        match self {
            VillageCategory::Cultural => "cultural",
            VillageCategory::Artisan => "artisan",
            VillageCategory::Nature => "nature",
            VillageCategory::Agricultural => "agricultural",
            VillageCategory::Historical => "historical",
        }
    }
}

impl fmt::Display for VillageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VillageCategory {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}

/// Store token to API status. Anything but `ACTIVE` reads as draft.
pub fn status_from_store(token: &str) -> VillageStatus {
    if token == STORE_ACTIVE {
        VillageStatus::Active
    } else {
        VillageStatus::Draft
    }
}

/// API status string to store token. Anything but `"active"` is stored as draft.
pub fn status_to_store(value: &str) -> &'static str {
    if value == VillageStatus::Active.as_str() {
        STORE_ACTIVE
    } else {
        STORE_DRAFT
    }
}

/// Store token to API category. The token is lowercased and must name a
/// known category.
pub fn category_from_store(token: &str) -> Result<VillageCategory, InvalidEnum> {
    token.to_lowercase().parse()
}

/// API category string to store token, coercing unknown input to
/// `CULTURAL`. Only the legacy importer relies on the coercion.
pub fn category_to_store(value: &str) -> &'static str {
    value
        .parse::<VillageCategory>()
        .unwrap_or_default()
        .store_token()
}

/// Strict request-path parsing of an optional status. Omitted means draft.
pub fn parse_status(value: Option<&str>) -> Result<VillageStatus, InvalidEnum> {
    Ok(VillageStatus::parse_optional(value)?.unwrap_or_default())
}

/// Strict request-path parsing of an optional category. Omitted means cultural.
pub fn parse_category(value: Option<&str>) -> Result<VillageCategory, InvalidEnum> {
    Ok(VillageCategory::parse_optional(value)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    #[test]
    fn test_status_round_trip() {
        for &status in VillageStatus::ALL {
            assert_eq!(status_from_store(status_to_store(status.as_str())), status);
            assert_eq!(status_from_store(status.store_token()), status);
        }
    }

    #[test]
    fn test_category_round_trip() {
        for &category in VillageCategory::ALL {
            assert_eq!(
                category_from_store(category_to_store(category.as_str())),
                Ok(category)
            );
        }
    }

    #[test]
    fn test_status_from_store_has_no_third_state() {
        assert_eq!(status_from_store("ACTIVE"), VillageStatus::Active);
        assert_eq!(status_from_store("DRAFT"), VillageStatus::Draft);
        assert_eq!(status_from_store("ARCHIVED"), VillageStatus::Draft);
        assert_eq!(status_from_store("active"), VillageStatus::Draft);
        assert_eq!(status_from_store(""), VillageStatus::Draft);
    }

    #[test]
    fn test_status_to_store_defaults_to_draft() {
        assert_eq!(status_to_store("active"), STORE_ACTIVE);
        assert_eq!(status_to_store("draft"), STORE_DRAFT);
        assert_eq!(status_to_store("ACTIVE"), STORE_DRAFT);
        assert_eq!(status_to_store("published"), STORE_DRAFT);
    }

    #[test]
    fn test_unknown_category_coerces_to_cultural() {
        let cultural = category_to_store("cultural");
        for _ in 0..50 {
            let word: String = Word().fake();
            if word.parse::<VillageCategory>().is_ok() {
                continue;
            }
            assert_eq!(category_to_store(&word), cultural, "input {}", word);
        }
        assert_eq!(category_to_store(""), cultural);
        assert_eq!(category_to_store("NATURE"), cultural);
        assert_eq!(category_to_store("gastronomic"), cultural);
    }

    #[test]
    fn test_category_from_store_lowercases_token() {
        assert_eq!(
            category_from_store("AGRICULTURAL"),
            Ok(VillageCategory::Agricultural)
        );
        assert_eq!(
            category_from_store("Historical"),
            Ok(VillageCategory::Historical)
        );
    }

    #[test]
    fn test_category_from_store_rejects_unknown_token() {
        let err = category_from_store("VOLCANIC").unwrap_err();
        assert_eq!(err.kind, "category");
        assert_eq!(err.value, "volcanic");
        assert!(err.allowed.contains("agricultural"));
    }

    #[test]
    fn test_parse_status_defaults_and_rejects() {
        assert_eq!(parse_status(None), Ok(VillageStatus::Draft));
        assert_eq!(parse_status(Some("")), Ok(VillageStatus::Draft));
        assert_eq!(parse_status(Some("active")), Ok(VillageStatus::Active));
        assert!(parse_status(Some("Active")).is_err());
        assert!(parse_status(Some("published")).is_err());
    }

    #[test]
    fn test_parse_category_defaults_and_rejects() {
        assert_eq!(parse_category(None), Ok(VillageCategory::Cultural));
        assert_eq!(parse_category(Some(" nature ")), Ok(VillageCategory::Nature));
        let err = parse_category(Some("volcanic")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid category 'volcanic'. Allowed values: cultural, artisan, nature, agricultural, historical"
        );
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_value(VillageStatus::Active).unwrap(),
            serde_json::json!("active")
        );
        assert_eq!(
            serde_json::to_value(VillageCategory::Agricultural).unwrap(),
            serde_json::json!("agricultural")
        );
    }
}

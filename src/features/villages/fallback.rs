use chrono::{DateTime, NaiveDate, Utc};

use crate::features::villages::models::{
    Infrastructure, Location, RoadAccess, VillageDraft, VillageRecord,
};
use crate::features::villages::normalization::{VillageCategory, STORE_ACTIVE};
use crate::shared::constants::DEFAULT_LANGUAGE;

/// Records served by the village list when the store cannot be reached
pub fn fallback_villages() -> Vec<VillageRecord> {
    let stamp = fallback_timestamp();
    vec![VillageRecord::from_draft(1, san_juan_del_obispo(), stamp, stamp)]
}

fn fallback_timestamp() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 8, 4)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn san_juan_del_obispo() -> VillageDraft {
    VillageDraft {
        name: "San Juan del Obispo".to_string(),
        name_en: None,
        slug: "san-juan-del-obispo".to_string(),
        short_desc: "Pueblo pintoresco declarado por UNESCO".to_string(),
        short_desc_en: None,
        description: "Aldea pintoresca de la Antigua Guatemala".to_string(),
        description_en: None,
        images: vec![
            "https://devnet.irys.xyz/85PcSP7bsr3mAP8219M7bNuQQc4K46cj34cYPEYk7WG5".to_string(),
        ],
        location: Location {
            lat: 14.5447,
            lng: -90.7342,
            distance: "4 km al sur de Antigua".to_string(),
            municipality: Some("Antigua Guatemala".to_string()),
            department: Some("Sacatepéquez".to_string()),
            elevation: Some("1,550 msnm".to_string()),
        },
        highlights: vec![
            "Pueblo Pintoresco UNESCO".to_string(),
            "Artesanías de níspero".to_string(),
        ],
        highlights_en: Vec::new(),
        population: Some(3586),
        founded_year: Some(1524),
        status: STORE_ACTIVE,
        category: VillageCategory::Artisan.store_token(),
        main_activities: vec!["Artesanías de níspero".to_string()],
        main_activities_en: Vec::new(),
        cultural_significance: "Pueblo declarado Pueblo Pintoresco por la UNESCO".to_string(),
        cultural_significance_en: None,
        infrastructure: Infrastructure {
            has_school: true,
            has_health_center: true,
            has_electricity: true,
            has_water: true,
            road_access: Some(RoadAccess::Paved),
        },
        languages: vec![DEFAULT_LANGUAGE.to_string()],
        languages_en: Vec::new(),
        economic_activities: vec!["Artesanías de níspero".to_string()],
        economic_activities_en: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_one_active_record() {
        let villages = fallback_villages();
        assert_eq!(villages.len(), 1);
        assert_eq!(villages[0].status, STORE_ACTIVE);
        assert_eq!(villages[0].slug, "san-juan-del-obispo");
        assert_eq!(
            villages[0].created_at.date_naive().to_string(),
            "2024-08-04"
        );
    }
}

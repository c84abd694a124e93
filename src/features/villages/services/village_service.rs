use std::sync::Arc;

use validator::ValidateUrl;

use crate::core::error::{AppError, Result};
use crate::features::tours::TourCatalog;
use crate::features::villages::dtos::{UpsertVillageDto, VillageCountsDto, VillageResponseDto};
use crate::features::villages::fallback::fallback_villages;
use crate::features::villages::models::{VillageDraft, VillageRecord};
use crate::features::villages::normalization::{
    category_to_store, parse_category, parse_status, status_from_store, status_to_store,
    VillageStatus, STORE_ACTIVE,
};
use crate::features::villages::store::VillageStore;
use crate::shared::constants::DEFAULT_LANGUAGE;
use crate::shared::validation::{clean_list, clean_optional, slugify, SLUG_REGEX};

/// How status and category input is mapped to store tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPolicy {
    /// Unknown values are rejected (API writes)
    Strict,
    /// Unknown values fall back to draft / cultural (legacy import)
    Lenient,
}

/// Village record access: normalization, defaults and the read fallback
pub struct VillageService {
    store: Arc<dyn VillageStore>,
    tours: Arc<TourCatalog>,
}

impl VillageService {
    pub fn new(store: Arc<dyn VillageStore>, tours: Arc<TourCatalog>) -> Self {
        Self { store, tours }
    }

    /// List villages in id order. Never fails: a store error is logged and
    /// answered with the fallback dataset, filtered the same way.
    pub async fn list(&self, status: Option<VillageStatus>) -> Vec<VillageResponseDto> {
        let token = status.map(VillageStatus::store_token);

        let records = match self.store.list(token).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Village store unavailable, serving fallback data: {}", e);
                fallback_villages()
                    .into_iter()
                    .filter(|r| token.map_or(true, |t| r.status == t))
                    .collect()
            }
        };

        records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                self.to_dto(record)
                    .map_err(|e| tracing::warn!("Skipping village {}: {}", id, e))
                    .ok()
            })
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<VillageResponseDto> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        self.to_dto(record)
    }

    /// Public detail lookup; drafts are not visible by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<VillageResponseDto> {
        let record = self
            .store
            .find_by_slug(slug)
            .await?
            .filter(|r| r.status == STORE_ACTIVE)
            .ok_or_else(not_found)?;

        self.to_dto(record)
    }

    pub async fn create(&self, dto: UpsertVillageDto) -> Result<VillageResponseDto> {
        let draft = build_draft(dto, EnumPolicy::Strict)?;
        let record = self.store.insert(&draft).await?;

        tracing::info!("Created village {} ({})", record.id, record.slug);
        self.to_dto(record)
    }

    /// Whole-record replace. Fields missing from `dto` are reset to their
    /// create-time defaults.
    pub async fn update(&self, id: i64, dto: UpsertVillageDto) -> Result<VillageResponseDto> {
        let draft = build_draft(dto, EnumPolicy::Strict)?;
        let record = self
            .store
            .replace(id, &draft)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!("Updated village {} ({})", record.id, record.slug);
        self.to_dto(record)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found());
        }

        tracing::info!("Deleted village {}", id);
        Ok(())
    }

    pub async fn counts(&self) -> Result<VillageCountsDto> {
        let rows = self.store.count_by_status().await?;

        Ok(rows
            .into_iter()
            .fold(VillageCountsDto::default(), |mut acc, (token, count)| {
                acc.total += count;
                match status_from_store(&token) {
                    VillageStatus::Active => acc.active += count,
                    VillageStatus::Draft => acc.draft += count,
                }
                acc
            }))
    }

    /// Insert legacy records with lenient enum mapping. Records that fail
    /// validation or collide with an existing slug are skipped.
    pub async fn import(&self, records: Vec<UpsertVillageDto>) -> Result<usize> {
        let mut imported = 0;

        for dto in records {
            let name = dto.name.clone();
            let draft = match build_draft(dto, EnumPolicy::Lenient) {
                Ok(draft) => draft,
                Err(e) => {
                    tracing::warn!("Skipping village '{}': {}", name, e);
                    continue;
                }
            };

            match self.store.insert(&draft).await {
                Ok(record) => {
                    tracing::info!("Imported village {} ({})", record.id, record.slug);
                    imported += 1;
                }
                Err(AppError::Conflict(_)) => {
                    tracing::warn!("Skipping village '{}': slug already exists", draft.slug);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(imported)
    }

    fn to_dto(&self, record: VillageRecord) -> Result<VillageResponseDto> {
        let tours = self.tours.count_in_village(&record.name);
        VillageResponseDto::from_record(record, tours)
            .map_err(|e| AppError::Internal(format!("Stored village is invalid: {}", e)))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Village not found".to_string())
}

/// Apply defaults and normalization to a write payload
pub fn build_draft(dto: UpsertVillageDto, policy: EnumPolicy) -> Result<VillageDraft> {
    let name = dto.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let slug = match clean_optional(dto.slug) {
        Some(slug) if SLUG_REGEX.is_match(&slug) => slug,
        Some(slug) => {
            return Err(AppError::Validation(format!(
                "Invalid slug '{}': use lowercase letters, digits and single hyphens",
                slug
            )))
        }
        None => slugify(&name),
    };
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Cannot derive a slug from the name; provide one".to_string(),
        ));
    }

    let (status, category) = match policy {
        EnumPolicy::Strict => (
            parse_status(dto.status.as_deref())?.store_token(),
            parse_category(dto.category.as_deref())?.store_token(),
        ),
        EnumPolicy::Lenient => (
            status_to_store(dto.status.as_deref().unwrap_or_default()),
            category_to_store(dto.category.as_deref().unwrap_or_default()),
        ),
    };

    let images = clean_list(dto.images.unwrap_or_default());
    if let Some(bad) = images.iter().find(|url| !url.validate_url()) {
        return Err(AppError::Validation(format!("Invalid image URL: {}", bad)));
    }

    let languages = clean_list(dto.languages.unwrap_or_default());
    let languages = if languages.is_empty() {
        vec![DEFAULT_LANGUAGE.to_string()]
    } else {
        languages
    };

    Ok(VillageDraft {
        name,
        name_en: clean_optional(dto.name_en),
        slug,
        short_desc: dto.short_desc.unwrap_or_default().trim().to_string(),
        short_desc_en: clean_optional(dto.short_desc_en),
        description: dto.description.unwrap_or_default().trim().to_string(),
        description_en: clean_optional(dto.description_en),
        images,
        location: dto.location.unwrap_or_default(),
        highlights: clean_list(dto.highlights.unwrap_or_default()),
        highlights_en: clean_list(dto.highlights_en.unwrap_or_default()),
        population: dto.population,
        founded_year: dto.founded_year,
        status,
        category,
        main_activities: clean_list(dto.main_activities.unwrap_or_default()),
        main_activities_en: clean_list(dto.main_activities_en.unwrap_or_default()),
        cultural_significance: dto.cultural_significance.unwrap_or_default().trim().to_string(),
        cultural_significance_en: clean_optional(dto.cultural_significance_en),
        infrastructure: dto.infrastructure.unwrap_or_default(),
        languages,
        languages_en: clean_list(dto.languages_en.unwrap_or_default()),
        economic_activities: clean_list(dto.economic_activities.unwrap_or_default()),
        economic_activities_en: clean_list(dto.economic_activities_en.unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::villages::normalization::{VillageCategory, STORE_DRAFT};
    use crate::shared::test_helpers::MemoryVillageStore;

    fn service_with(store: Arc<MemoryVillageStore>) -> VillageService {
        let tours = Arc::new(TourCatalog::load(None).unwrap());
        VillageService::new(store, tours)
    }

    fn named(name: &str) -> UpsertVillageDto {
        UpsertVillageDto {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_draft_applies_defaults() {
        let draft = build_draft(named("Santa María de Jesús"), EnumPolicy::Strict).unwrap();

        assert_eq!(draft.slug, "santa-maria-de-jesus");
        assert_eq!(draft.status, STORE_DRAFT);
        assert_eq!(draft.category, VillageCategory::Cultural.store_token());
        assert_eq!(draft.languages, vec!["Español".to_string()]);
        assert!(draft.images.is_empty());
        assert!(draft.highlights.is_empty());
    }

    #[test]
    fn test_build_draft_drops_blank_list_entries() {
        let dto = UpsertVillageDto {
            highlights: Some(vec!["".to_string(), " Café ".to_string()]),
            languages: Some(vec!["".to_string()]),
            ..named("Test")
        };
        let draft = build_draft(dto, EnumPolicy::Strict).unwrap();
        assert_eq!(draft.highlights, vec!["Café".to_string()]);
        assert_eq!(draft.languages, vec!["Español".to_string()]);
    }

    #[test]
    fn test_build_draft_strict_rejects_unknown_enums() {
        let dto = UpsertVillageDto {
            category: Some("volcanic".to_string()),
            ..named("Test")
        };
        assert!(matches!(
            build_draft(dto, EnumPolicy::Strict),
            Err(AppError::Validation(_))
        ));

        let dto = UpsertVillageDto {
            status: Some("published".to_string()),
            ..named("Test")
        };
        assert!(matches!(
            build_draft(dto, EnumPolicy::Strict),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_build_draft_lenient_coerces_unknown_enums() {
        let dto = UpsertVillageDto {
            status: Some("published".to_string()),
            category: Some("volcanic".to_string()),
            ..named("Test")
        };
        let draft = build_draft(dto, EnumPolicy::Lenient).unwrap();
        assert_eq!(draft.status, STORE_DRAFT);
        assert_eq!(draft.category, "CULTURAL");
    }

    #[test]
    fn test_build_draft_validates_slug_and_images() {
        let dto = UpsertVillageDto {
            slug: Some("Bad Slug".to_string()),
            ..named("Test")
        };
        assert!(build_draft(dto, EnumPolicy::Strict).is_err());

        let dto = UpsertVillageDto {
            images: Some(vec!["not a url".to_string()]),
            ..named("Test")
        };
        assert!(build_draft(dto, EnumPolicy::Strict).is_err());

        assert!(build_draft(named("¿?"), EnumPolicy::Strict).is_err());
        assert!(build_draft(named("   "), EnumPolicy::Strict).is_err());
    }

    #[tokio::test]
    async fn test_create_sets_id_and_matching_dates() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        let village = service.create(named("Ciudad Vieja")).await.unwrap();

        assert!(village.id > 0);
        assert_eq!(village.created_at, village.updated_at);
        assert_eq!(village.tours, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        let created = service
            .create(UpsertVillageDto {
                highlights: Some(vec!["x".to_string(), "y".to_string()]),
                status: Some("active".to_string()),
                ..named("A")
            })
            .await
            .unwrap();

        let updated = service.update(created.id, named("B")).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "B");
        assert_eq!(updated.slug, "b");
        assert!(updated.highlights.is_empty());
        assert_eq!(updated.status, VillageStatus::Draft);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));

        assert!(matches!(service.get(99999).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(99999, named("X")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(99999).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_falls_back_when_store_is_down() {
        let service = service_with(Arc::new(MemoryVillageStore::unavailable()));

        let all = service.list(None).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "San Juan del Obispo");

        let active = service.list(Some(VillageStatus::Active)).await;
        assert_eq!(active.len(), 1);

        let drafts = service.list(Some(VillageStatus::Draft)).await;
        assert!(drafts.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        service
            .create(UpsertVillageDto {
                status: Some("active".to_string()),
                ..named("Uno")
            })
            .await
            .unwrap();
        service.create(named("Dos")).await.unwrap();

        let active = service.list(Some(VillageStatus::Active)).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Uno");
        assert_eq!(service.list(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_slug_hides_drafts() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        service.create(named("Borrador")).await.unwrap();
        service
            .create(UpsertVillageDto {
                status: Some("active".to_string()),
                ..named("Publicada")
            })
            .await
            .unwrap();

        assert!(service.get_by_slug("publicada").await.is_ok());
        assert!(matches!(
            service.get_by_slug("borrador").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        service.create(named("Ciudad Vieja")).await.unwrap();

        assert!(matches!(
            service.create(named("Ciudad  Vieja")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_counts_by_status() {
        let service = service_with(Arc::new(MemoryVillageStore::default()));
        for name in ["Uno", "Dos"] {
            service
                .create(UpsertVillageDto {
                    status: Some("active".to_string()),
                    ..named(name)
                })
                .await
                .unwrap();
        }
        service.create(named("Tres")).await.unwrap();

        let counts = service.counts().await.unwrap();
        assert_eq!(
            counts,
            VillageCountsDto {
                total: 3,
                active: 2,
                draft: 1
            }
        );
    }

    #[tokio::test]
    async fn test_import_is_lenient_and_skips_duplicates() {
        let store = Arc::new(MemoryVillageStore::default());
        let service = service_with(store.clone());
        let legacy: Vec<UpsertVillageDto> = serde_json::from_str(include_str!(
            "../../../../data/villages.seed.json"
        ))
        .unwrap();
        let total = legacy.len();

        assert_eq!(service.import(legacy.clone()).await.unwrap(), total);
        assert_eq!(service.import(legacy).await.unwrap(), 0);

        let villages = service.list(None).await;
        assert_eq!(villages.len(), total);
        assert!(villages
            .iter()
            .all(|v| v.category == VillageCategory::Cultural));
    }
}

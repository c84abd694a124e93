use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::villages::models::{VillageDraft, VillageRecord};

const VILLAGE_COLUMNS: &str = r#"
    id, name, name_en, slug, short_desc, short_desc_en, description, description_en,
    images, location, highlights, highlights_en, population, founded_year, status, category,
    main_activities, main_activities_en, cultural_significance, cultural_significance_en,
    infrastructure, languages, languages_en, economic_activities, economic_activities_en,
    created_at, updated_at
"#;

/// Persistence seam for village records.
///
/// `status` arguments and the status column carry store tokens
/// (`ACTIVE`/`DRAFT`); normalization happens in the service.
#[async_trait]
pub trait VillageStore: Send + Sync {
    /// All rows ordered by id, optionally restricted to one status token
    async fn list(&self, status: Option<&'static str>) -> Result<Vec<VillageRecord>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<VillageRecord>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<VillageRecord>>;

    async fn insert(&self, draft: &VillageDraft) -> Result<VillageRecord>;

    /// Overwrite every column of an existing row. `None` when the id is unknown.
    async fn replace(&self, id: i64, draft: &VillageDraft) -> Result<Option<VillageRecord>>;

    /// `false` when the id is unknown
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Row count per status token
    async fn count_by_status(&self) -> Result<Vec<(String, i64)>>;
}

/// PostgreSQL-backed village store
pub struct PgVillageStore {
    pool: PgPool,
}

impl PgVillageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VillageStore for PgVillageStore {
    async fn list(&self, status: Option<&'static str>) -> Result<Vec<VillageRecord>> {
        let sql = format!(
            "SELECT {} FROM villages WHERE ($1::text IS NULL OR status = $1) ORDER BY id ASC",
            VILLAGE_COLUMNS
        );

        sqlx::query_as::<_, VillageRecord>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch villages: {:?}", e);
                AppError::from(e)
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VillageRecord>> {
        let sql = format!("SELECT {} FROM villages WHERE id = $1", VILLAGE_COLUMNS);

        sqlx::query_as::<_, VillageRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch village {}: {:?}", id, e);
                AppError::from(e)
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<VillageRecord>> {
        let sql = format!("SELECT {} FROM villages WHERE slug = $1", VILLAGE_COLUMNS);

        sqlx::query_as::<_, VillageRecord>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch village by slug '{}': {:?}", slug, e);
                AppError::from(e)
            })
    }

    async fn insert(&self, draft: &VillageDraft) -> Result<VillageRecord> {
        let sql = format!(
            r#"
            INSERT INTO villages (
                name, name_en, slug, short_desc, short_desc_en, description, description_en,
                images, location, highlights, highlights_en, population, founded_year,
                status, category, main_activities, main_activities_en,
                cultural_significance, cultural_significance_en, infrastructure,
                languages, languages_en, economic_activities, economic_activities_en
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
            )
            RETURNING {}
            "#,
            VILLAGE_COLUMNS
        );

        bind_draft(sqlx::query_as::<_, VillageRecord>(&sql), draft)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert village '{}': {:?}", draft.slug, e);
                AppError::from(e)
            })
    }

    async fn replace(&self, id: i64, draft: &VillageDraft) -> Result<Option<VillageRecord>> {
        let sql = format!(
            r#"
            UPDATE villages SET
                name = $1, name_en = $2, slug = $3, short_desc = $4, short_desc_en = $5,
                description = $6, description_en = $7, images = $8, location = $9,
                highlights = $10, highlights_en = $11, population = $12, founded_year = $13,
                status = $14, category = $15, main_activities = $16, main_activities_en = $17,
                cultural_significance = $18, cultural_significance_en = $19,
                infrastructure = $20, languages = $21, languages_en = $22,
                economic_activities = $23, economic_activities_en = $24,
                updated_at = NOW()
            WHERE id = $25
            RETURNING {}
            "#,
            VILLAGE_COLUMNS
        );

        bind_draft(sqlx::query_as::<_, VillageRecord>(&sql), draft)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update village {}: {:?}", id, e);
                AppError::from(e)
            })
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM villages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete village {}: {:?}", id, e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> Result<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) AS count FROM villages GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count villages: {:?}", e);
            AppError::from(e)
        })
    }
}

type VillageQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, VillageRecord, sqlx::postgres::PgArguments>;

/// Bind the 24 draft columns in table order
fn bind_draft<'q>(query: VillageQuery<'q>, draft: &'q VillageDraft) -> VillageQuery<'q> {
    query
        .bind(&draft.name)
        .bind(&draft.name_en)
        .bind(&draft.slug)
        .bind(&draft.short_desc)
        .bind(&draft.short_desc_en)
        .bind(&draft.description)
        .bind(&draft.description_en)
        .bind(&draft.images)
        .bind(Json(&draft.location))
        .bind(&draft.highlights)
        .bind(&draft.highlights_en)
        .bind(draft.population)
        .bind(draft.founded_year)
        .bind(draft.status)
        .bind(draft.category)
        .bind(&draft.main_activities)
        .bind(&draft.main_activities_en)
        .bind(&draft.cultural_significance)
        .bind(&draft.cultural_significance_en)
        .bind(Json(&draft.infrastructure))
        .bind(&draft.languages)
        .bind(&draft.languages_en)
        .bind(&draft.economic_activities)
        .bind(&draft.economic_activities_en)
}

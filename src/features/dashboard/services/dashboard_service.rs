use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::events::services::{EventCatalog, EventFilter};
use crate::features::tours::TourCatalog;
use crate::features::uploads::UploadService;
use crate::features::villages::VillageService;

/// Aggregates counts across features for the admin dashboard
pub struct DashboardService {
    villages: Arc<VillageService>,
    tours: Arc<TourCatalog>,
    events: Arc<EventCatalog>,
    uploads: Arc<UploadService>,
}

impl DashboardService {
    pub fn new(
        villages: Arc<VillageService>,
        tours: Arc<TourCatalog>,
        events: Arc<EventCatalog>,
        uploads: Arc<UploadService>,
    ) -> Self {
        Self {
            villages,
            tours,
            events,
            uploads,
        }
    }

    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummaryDto> {
        let villages = self.villages.counts().await?;
        let upcoming_events = self
            .events
            .search(&EventFilter {
                from: Some(today),
                ..Default::default()
            })
            .len();

        Ok(DashboardSummaryDto {
            villages,
            tours: self.tours.len(),
            events: self.events.len(),
            upcoming_events,
            uploads_enabled: self.uploads.is_configured(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::villages::dtos::UpsertVillageDto;
    use crate::shared::test_helpers::MemoryVillageStore;

    #[tokio::test]
    async fn test_summary_counts_every_feature() {
        let tours = Arc::new(TourCatalog::load(None).unwrap());
        let villages = Arc::new(VillageService::new(
            Arc::new(MemoryVillageStore::default()),
            tours.clone(),
        ));
        villages
            .create(UpsertVillageDto {
                name: "Ciudad Vieja".to_string(),
                status: Some("active".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let service = DashboardService::new(
            villages,
            tours,
            Arc::new(EventCatalog::load(None).unwrap()),
            Arc::new(UploadService::unconfigured("not configured")),
        );

        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let summary = service.get_summary(today).await.unwrap();

        assert_eq!(summary.villages.total, 1);
        assert_eq!(summary.villages.active, 1);
        assert_eq!(summary.tours, 8);
        assert_eq!(summary.events, 6);
        assert_eq!(summary.upcoming_events, 3);
        assert!(!summary.uploads_enabled);
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::villages::dtos::VillageCountsDto;

/// Content summary shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub villages: VillageCountsDto,
    pub tours: usize,
    pub events: usize,
    /// Events dated today or later
    pub upcoming_events: usize,
    /// Whether the upload backend is configured
    pub uploads_enabled: bool,
}

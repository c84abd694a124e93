use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing events
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListEventsQuery {
    /// One of `festival`, `cultural`, `religious`, `gastronomic`, `artisan`
    #[param(example = "cultural")]
    pub category: Option<String>,
    /// Case-insensitive match on title or location
    pub q: Option<String>,
    /// Only featured (`true`) or only regular (`false`) events
    pub featured: Option<bool>,
    /// When `true`, only events dated today or later
    pub upcoming: Option<bool>,
}

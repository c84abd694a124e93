use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing tours
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListToursQuery {
    /// One of `cultural`, `adventure`, `gastronomic`, `artisan`, `nature`
    #[param(example = "adventure")]
    pub category: Option<String>,
    /// Case-insensitive match on title or location
    #[param(example = "volcán")]
    pub q: Option<String>,
}

use std::path::Path;

use anyhow::Context;

use crate::core::error::{AppError, Result};
use crate::features::tours::models::{Tour, TourCategory};
use crate::shared::types::normalize_search;

const BUNDLED_TOURS: &str = include_str!("../../../../data/tours.json");

/// Read-only tour catalog, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct TourCatalog {
    tours: Vec<Tour>,
}

impl TourCatalog {
    /// Load from a JSON file, or from the bundled dataset when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let catalog = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read tours from {}", path.display()))?;
                Self::from_json(&raw)
                    .with_context(|| format!("Invalid tours document {}", path.display()))?
            }
            None => Self::from_json(BUNDLED_TOURS).context("Invalid bundled tours document")?,
        };

        tracing::info!("Loaded {} tours", catalog.tours.len());
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let tours: Vec<Tour> = serde_json::from_str(raw)?;
        Ok(Self::new(tours))
    }

    pub fn new(mut tours: Vec<Tour>) -> Self {
        tours.sort_by_key(|t| t.id);
        Self { tours }
    }

    /// Tours in id order, narrowed by category and a title/location search
    pub fn search(&self, category: Option<TourCategory>, q: Option<&str>) -> Vec<Tour> {
        let term = normalize_search(q);

        self.tours
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .filter(|t| {
                term.as_deref().map_or(true, |term| {
                    t.title.to_lowercase().contains(term)
                        || t.location.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Result<Tour> {
        self.tours
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))
    }

    /// Number of tours whose location is the given village
    pub fn count_in_village(&self, village_name: &str) -> usize {
        let name = village_name.trim().to_lowercase();
        self.tours
            .iter()
            .filter(|t| t.location.trim().to_lowercase() == name)
            .count()
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

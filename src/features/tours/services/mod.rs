mod tour_catalog;

pub use tour_catalog::TourCatalog;

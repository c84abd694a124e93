mod tour;

pub use tour::{Tour, TourCategory, TourDifficulty};

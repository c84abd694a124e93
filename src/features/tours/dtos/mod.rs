mod tour_dto;

pub use tour_dto::ListToursQuery;

pub mod tour_handler;

pub use tour_handler::{__path_get_tour, __path_list_tours, get_tour, list_tours};

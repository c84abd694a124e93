//! Tour catalog feature.
//!
//! Tours are read-only. The catalog is loaded once at startup from the
//! bundled dataset or from `TOURS_DATA_PATH`, and also feeds the `tours`
//! count on villages.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/tours` | List tours (`category`, `q` filters) |
//! | GET | `/api/tours/{id}` | Get tour by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::TourCatalog;

//! Event calendar feature.
//!
//! Events are read-only and loaded once at startup from the bundled
//! dataset or from `EVENTS_DATA_PATH`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/events` | List events by date (`category`, `q`, `featured`, `upcoming`) |
//! | GET | `/api/events/{id}` | Get event by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::EventCatalog;

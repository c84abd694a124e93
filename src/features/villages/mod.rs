//! Village ("aldea") records.
//!
//! Villages are the only persisted entity. Status and category are stored
//! as uppercase tokens and exposed as lowercase values; see
//! [`normalization`]. Listing never fails: when the store is unreachable
//! the built-in fallback record is served instead.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/villages` | - | List villages (`status` filter) |
//! | GET | `/api/villages/{id}` | - | Get village by id |
//! | GET | `/api/villages/slug/{slug}` | - | Get published village by slug |
//! | POST | `/api/villages` | session | Create village |
//! | PUT | `/api/villages/{id}` | session | Replace village |
//! | DELETE | `/api/villages/{id}` | session | Delete village |

pub mod dtos;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod normalization;
pub mod routes;
pub mod services;
pub mod store;

pub use routes::{admin_routes, public_routes};
pub use services::VillageService;
pub use store::{PgVillageStore, VillageStore};

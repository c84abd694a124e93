//! Admin dashboard summary.
//!
//! Counts drawn from the village store, both catalogs and the upload
//! backend status.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/dashboard/summary` | Yes | Village, tour and event counts |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;

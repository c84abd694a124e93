//! Admin session gate.
//!
//! A single admin account logs in with the configured credentials and
//! receives a bearer token. Write routes across the API sit behind
//! `core::middleware::auth_middleware`, which validates that token.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Exchange admin credentials for a session token |
//! | GET | `/api/auth/me` | Yes | Current admin identity |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::SessionService;

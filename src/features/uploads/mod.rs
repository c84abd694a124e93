//! Media uploads.
//!
//! `POST /api/upload` stores a file in the configured blob store and
//! returns its public URL and content address. Requires an admin session.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UploadService;

//! Feature modules, one per API area

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod tours;
pub mod uploads;
pub mod villages;

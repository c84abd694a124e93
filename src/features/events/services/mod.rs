mod event_catalog;

pub use event_catalog::{EventCatalog, EventFilter};

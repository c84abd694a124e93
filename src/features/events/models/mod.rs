mod event;

pub use event::{EntryType, Event, EventCategory};

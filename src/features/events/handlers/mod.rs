pub mod event_handler;

pub use event_handler::{__path_get_event, __path_list_events, get_event, list_events};

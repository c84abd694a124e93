mod event_dto;

pub use event_dto::ListEventsQuery;

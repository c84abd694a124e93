mod village_service;

pub use village_service::{build_draft, EnumPolicy, VillageService};

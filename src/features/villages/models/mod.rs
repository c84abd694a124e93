mod village;

pub use village::{Infrastructure, Location, RoadAccess, VillageDraft, VillageRecord};

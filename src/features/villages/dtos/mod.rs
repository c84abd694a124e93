mod village_dto;

pub use village_dto::{ListVillagesQuery, UpsertVillageDto, VillageCountsDto, VillageResponseDto};

pub mod timestamp;
pub mod vehicle_dto;

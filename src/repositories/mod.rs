pub mod memory_repository;
pub mod vehicle_repository;

pub use memory_repository::InMemoryVehicleRepository;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};

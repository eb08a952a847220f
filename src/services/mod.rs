//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación:
//! el servicio de vehículos y el bus de eventos de ubicación.

pub mod location_events;
pub mod vehicle_service;

pub use location_events::{LocationEventBus, LocationSubscription};
pub use vehicle_service::VehicleService;

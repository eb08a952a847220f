//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::VehicleRepository;
use crate::services::{LocationEventBus, VehicleService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<VehicleService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn VehicleRepository>, config: EnvironmentConfig) -> Self {
        let events = LocationEventBus::new(config.stream_buffer);
        let vehicles = VehicleService::new(repository, events, config.geofence);

        Self {
            config,
            vehicles: Arc::new(vehicles),
        }
    }
}

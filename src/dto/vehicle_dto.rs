use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Location, Vehicle};

// Request para registrar un vehículo
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub id: Uuid,
}

// Request para actualizar la ubicación de un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    #[serde(with = "crate::dto::timestamp")]
    pub at: DateTime<Utc>,
}

// Response de vehículo
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VehicleResponse {
    pub id: Uuid,
}

// Response de ubicación
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LocationResponse {
    pub lat: f64,
    pub lng: f64,
    #[serde(with = "crate::dto::timestamp")]
    pub at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self { id: vehicle.id }
    }
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            lat: location.lat,
            lng: location.lng,
            at: location.at,
        }
    }
}

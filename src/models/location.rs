//! Modelo de Location
//!
//! Posición GPS con marca de tiempo de un vehículo. Inmutable una vez
//! creada; el historial de cada vehículo solo crece.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Location - mapea a la tabla locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub vehicle_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub at: DateTime<Utc>,
}

impl Location {
    pub fn new(vehicle_id: Uuid, lat: f64, lng: f64, at: DateTime<Utc>) -> Self {
        Self { vehicle_id, lat, lng, at }
    }
}

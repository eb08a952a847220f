//! Modelo de Vehicle
//!
//! Un vehículo solo se identifica por su UUID.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
}

impl Vehicle {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

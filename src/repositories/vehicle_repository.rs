//! Repositorio de vehículos
//!
//! `VehicleRepository` es la interfaz del almacén de documentos. La
//! implementación PostgreSQL vive aquí; la de memoria en `memory_repository`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Location, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Registra un vehículo. `Conflict` si el id ya existe.
    async fn create(&self, id: Uuid) -> AppResult<Vehicle>;

    /// Lista los vehículos en orden de registro
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Elimina el vehículo y todas sus ubicaciones. `false` si no existía.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Añade una ubicación al historial. `NotFound` si el vehículo ya no existe.
    async fn insert_location(&self, location: &Location) -> AppResult<()>;

    /// Historial en orden de inserción
    async fn find_locations(&self, vehicle_id: Uuid) -> AppResult<Vec<Location>>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, id: Uuid) -> AppResult<Vehicle> {
        let result = sqlx::query("INSERT INTO vehicles (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(conflict_error("Vehicle", "id", &id.to_string()));
        }

        debug!("Vehicle {} inserted", id);
        Ok(Vehicle::new(id))
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id FROM vehicles ORDER BY created_at, id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // locations se borran por ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_location(&self, location: &Location) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO locations (vehicle_id, lat, lng, at)
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(location.vehicle_id)
        .bind(location.lat)
        .bind(location.lng)
        .bind(location.at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // El vehículo se borró entre la comprobación y el insert
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                not_found_error("Vehicle", &location.vehicle_id.to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(())
    }

    async fn find_locations(&self, vehicle_id: Uuid) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT vehicle_id, lat, lng, at
            FROM locations
            WHERE vehicle_id = $1
            ORDER BY seq
            "#
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }
}

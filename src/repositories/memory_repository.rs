//! Repositorio en memoria
//!
//! Se usa cuando no hay DATABASE_URL y en los tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::vehicle_repository::VehicleRepository;
use crate::models::{Location, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Default)]
struct Collections {
    vehicles: Vec<Vehicle>,
    locations: HashMap<Uuid, Vec<Location>>,
}

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    collections: RwLock<Collections>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, id: Uuid) -> AppResult<Vehicle> {
        let mut collections = self.collections.write().await;
        if collections.locations.contains_key(&id) {
            return Err(conflict_error("Vehicle", "id", &id.to_string()));
        }

        let vehicle = Vehicle::new(id);
        collections.vehicles.push(vehicle.clone());
        collections.locations.insert(id, Vec::new());
        log::debug!("💾 Vehicle {} stored ({} total)", id, collections.vehicles.len());

        Ok(vehicle)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.collections.read().await.vehicles.clone())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.collections.read().await.locations.contains_key(&id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(removed) = collections.locations.remove(&id) else {
            return Ok(false);
        };
        collections.vehicles.retain(|v| v.id != id);
        log::debug!("🗑️ Vehicle {} removed with {} locations", id, removed.len());

        Ok(true)
    }

    async fn insert_location(&self, location: &Location) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let history = collections
            .locations
            .get_mut(&location.vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", &location.vehicle_id.to_string()))?;
        history.push(location.clone());

        Ok(())
    }

    async fn find_locations(&self, vehicle_id: Uuid) -> AppResult<Vec<Location>> {
        Ok(self
            .collections
            .read()
            .await
            .locations
            .get(&vehicle_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::utils::errors::AppError;

    #[tokio::test]
    async fn test_create_and_list() {
        let repo = InMemoryVehicleRepository::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        repo.create(first).await.unwrap();
        repo.create(second).await.unwrap();

        let ids: Vec<Uuid> = repo.find_all().await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(repo.exists(first).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_vehicle_conflicts() {
        let repo = InMemoryVehicleRepository::new();
        let id = Uuid::new_v4();

        repo.create(id).await.unwrap();
        let result = repo.create(id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_locations() {
        let repo = InMemoryVehicleRepository::new();
        let id = Uuid::new_v4();
        repo.create(id).await.unwrap();
        repo.insert_location(&Location::new(id, 52.53, 13.403, Utc::now())).await.unwrap();
        repo.insert_location(&Location::new(id, 52.52, 13.41, Utc::now())).await.unwrap();
        assert_eq!(repo.find_locations(id).await.unwrap().len(), 2);

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.exists(id).await.unwrap());
        assert!(repo.find_locations(id).await.unwrap().is_empty());
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_location_for_missing_vehicle() {
        let repo = InMemoryVehicleRepository::new();
        let location = Location::new(Uuid::new_v4(), 52.53, 13.403, Utc::now());

        let result = repo.insert_location(&location).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_locations_keep_insertion_order() {
        let repo = InMemoryVehicleRepository::new();
        let id = Uuid::new_v4();
        repo.create(id).await.unwrap();

        for i in 0..5 {
            let lat = 52.53 + i as f64 * 0.001;
            repo.insert_location(&Location::new(id, lat, 13.403, Utc::now())).await.unwrap();
        }

        let lats: Vec<f64> = repo.find_locations(id).await.unwrap().iter().map(|l| l.lat).collect();
        assert_eq!(lats.len(), 5);
        assert!(lats.windows(2).all(|w| w[0] < w[1]));
    }
}

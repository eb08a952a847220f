//! Servicio de vehículos
//!
//! Reglas de negocio sobre el repositorio: existencia del vehículo,
//! geocerca y publicación de ubicaciones a los suscriptores.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::location_events::{LocationEventBus, LocationSubscription};
use crate::dto::vehicle_dto::UpdateLocationRequest;
use crate::models::{Location, Vehicle};
use crate::repositories::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::geo::{Geofence, Point};

pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
    events: LocationEventBus,
    geofence: Geofence,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn VehicleRepository>, events: LocationEventBus, geofence: Geofence) -> Self {
        Self {
            repository,
            events,
            geofence,
        }
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    /// Registra un vehículo nuevo
    pub async fn create_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self.repository.create(id).await?;
        info!("🚗 Vehículo registrado: {}", id);
        Ok(vehicle)
    }

    pub async fn find_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.find_all().await
    }

    /// Elimina el vehículo con su historial y cierra sus streams.
    /// Devuelve `false` si no existía.
    pub async fn delete_vehicle(&self, id: Uuid) -> AppResult<bool> {
        if !self.repository.delete(id).await? {
            return Ok(false);
        }
        self.events.close(id).await;
        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(true)
    }

    /// Registra una nueva ubicación.
    ///
    /// `NotFound` si el vehículo no existe (tiene prioridad sobre el resto);
    /// después `Validation` si las coordenadas están fuera de rango y
    /// `GeofenceViolation` si el punto cae fuera del radio. En esos casos no
    /// se guarda ni se publica nada.
    pub async fn location_update(
        &self,
        id: Uuid,
        request: UpdateLocationRequest,
    ) -> AppResult<Location> {
        self.ensure_exists(id).await?;
        request.validate()?;

        let point = Point::new(request.lat, request.lng);
        if !self.geofence.contains(&point) {
            return Err(AppError::GeofenceViolation {
                distance_km: self.geofence.distance_from_center(&point),
                radius_km: self.geofence.radius_km,
            });
        }

        let location = Location::new(id, request.lat, request.lng, request.at);
        self.repository.insert_location(&location).await?;
        debug!("📍 Ubicación de {} guardada ({}, {})", id, location.lat, location.lng);

        // Fire-and-forget
        let _ = self.events.publish(location.clone());

        Ok(location)
    }

    /// Historial de ubicaciones, `NotFound` si el vehículo no existe
    pub async fn find_locations(&self, id: Uuid) -> AppResult<Vec<Location>> {
        self.ensure_exists(id).await?;
        self.repository.find_locations(id).await
    }

    /// Suscripción a las ubicaciones futuras de un vehículo existente
    pub async fn watch_locations(&self, id: Uuid) -> AppResult<LocationSubscription> {
        self.ensure_exists(id).await?;
        Ok(self.events.subscribe(id).await)
    }

    async fn ensure_exists(&self, id: Uuid) -> AppResult<()> {
        if self.repository.exists(id).await? {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", &id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repositories::InMemoryVehicleRepository;

    fn create_service() -> VehicleService {
        create_service_with(Geofence::default())
    }

    fn create_service_with(geofence: Geofence) -> VehicleService {
        VehicleService::new(
            Arc::new(InMemoryVehicleRepository::new()),
            LocationEventBus::default(),
            geofence,
        )
    }

    fn request(lat: f64, lng: f64) -> UpdateLocationRequest {
        UpdateLocationRequest { lat, lng, at: Utc::now() }
    }

    #[tokio::test]
    async fn test_location_update_inside_geofence() {
        let service = create_service();
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();

        let location = service.location_update(id, request(52.52, 13.41)).await.unwrap();

        assert_eq!(location.vehicle_id, id);
        assert_eq!(service.find_locations(id).await.unwrap(), vec![location]);
    }

    #[tokio::test]
    async fn test_location_update_outside_geofence_is_rejected() {
        let service = create_service();
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();
        let mut sub = service.watch_locations(id).await.unwrap();

        let result = service.location_update(id, request(38.71667, -9.13333)).await;

        match result {
            Err(AppError::GeofenceViolation { distance_km, radius_km }) => {
                assert!(distance_km > 2000.0);
                assert_eq!(radius_km, 3.5);
            }
            other => panic!("expected geofence violation, got {:?}", other),
        }
        assert!(service.find_locations(id).await.unwrap().is_empty());

        // Nada publicado: la siguiente ubicación válida es la primera que llega
        service.location_update(id, request(52.53, 13.403)).await.unwrap();
        assert_eq!(sub.recv().await.unwrap().lat, 52.53);
    }

    #[tokio::test]
    async fn test_location_update_missing_vehicle() {
        let service = create_service();

        // Fuera de la geocerca también: not-found tiene prioridad
        let result = service.location_update(Uuid::new_v4(), request(0.0, 0.0)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_location_update_missing_vehicle_with_invalid_coordinates() {
        let service = create_service();

        let result = service.location_update(Uuid::new_v4(), request(120.0, 13.403)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_location_update_invalid_coordinates() {
        let service = create_service();
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();

        let result = service.location_update(id, request(120.0, 13.403)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.find_locations(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_location_update_on_geofence_boundary() {
        let center = Point::new(52.53, 13.403);
        let edge = Point::new(52.56, 13.403);
        let service = create_service_with(Geofence::new(center, center.distance(&edge)));
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();

        let location = service.location_update(id, request(edge.lat, edge.lng)).await.unwrap();
        assert_eq!(location.lat, edge.lat);

        // Un poco más allá del borde ya se rechaza
        let result = service.location_update(id, request(52.5601, 13.403)).await;
        assert!(matches!(result, Err(AppError::GeofenceViolation { .. })));
        assert_eq!(service.find_locations(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_vehicle_removes_locations() {
        let service = create_service();
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();
        service.location_update(id, request(52.53, 13.403)).await.unwrap();

        assert!(service.delete_vehicle(id).await.unwrap());

        assert!(matches!(service.find_locations(id).await, Err(AppError::NotFound(_))));
        assert!(!service.delete_vehicle(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_vehicle_closes_subscriptions() {
        let service = create_service();
        let id = Uuid::new_v4();
        service.create_vehicle(id).await.unwrap();
        let mut sub = service.watch_locations(id).await.unwrap();

        service.delete_vehicle(id).await.unwrap();

        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_watch_missing_vehicle() {
        let service = create_service();
        let result = service.watch_locations(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

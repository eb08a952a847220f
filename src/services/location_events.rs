//! Bus de eventos de ubicación
//!
//! Canal publish/subscribe en memoria, indexado por id de vehículo. La
//! entrega es best-effort: sin replay, sin persistencia entre reinicios.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::Location;

/// Capacidad por defecto de cada canal
pub const DEFAULT_STREAM_BUFFER: usize = 64;

#[derive(Clone)]
pub struct LocationEventBus {
    channels: Arc<RwLock<HashMap<Uuid, broadcast::Sender<Location>>>>,
    capacity: usize,
}

impl Default for LocationEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_BUFFER)
    }
}

impl LocationEventBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Registra interés en las próximas ubicaciones de un vehículo
    pub async fn subscribe(&self, vehicle_id: Uuid) -> LocationSubscription {
        let mut channels = self.channels.write().await;
        let receiver = channels
            .entry(vehicle_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        debug!("📡 Nuevo suscriptor para vehículo {}", vehicle_id);

        LocationSubscription { vehicle_id, receiver }
    }

    /// Publica en una tarea aparte y vuelve enseguida.
    ///
    /// El handle devuelve cuántos suscriptores recibieron el evento; los
    /// llamadores normales lo ignoran.
    pub fn publish(&self, location: Location) -> JoinHandle<usize> {
        let bus = self.clone();
        tokio::spawn(async move { bus.deliver(location).await })
    }

    async fn deliver(&self, location: Location) -> usize {
        let vehicle_id = location.vehicle_id;
        let delivered = {
            let channels = self.channels.read().await;
            match channels.get(&vehicle_id) {
                Some(sender) => sender.send(location).unwrap_or(0),
                None => return 0,
            }
        };

        if delivered == 0 {
            self.prune(vehicle_id).await;
        } else {
            debug!("📤 Ubicación de {} entregada a {} suscriptores", vehicle_id, delivered);
        }
        delivered
    }

    /// Quita el canal si ya no tiene receptores
    async fn prune(&self, vehicle_id: Uuid) {
        let mut channels = self.channels.write().await;
        if channels
            .get(&vehicle_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(&vehicle_id);
            debug!("🧹 Canal de {} eliminado (sin suscriptores)", vehicle_id);
        }
    }

    /// Cierra el canal; los suscriptores activos ven fin de stream.
    pub async fn close(&self, vehicle_id: Uuid) {
        if self.channels.write().await.remove(&vehicle_id).is_some() {
            debug!("🔒 Canal de {} cerrado", vehicle_id);
        }
    }

    pub async fn subscriber_count(&self, vehicle_id: Uuid) -> usize {
        self.channels
            .read()
            .await
            .get(&vehicle_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

/// Suscripción a las ubicaciones de un vehículo
pub struct LocationSubscription {
    vehicle_id: Uuid,
    receiver: broadcast::Receiver<Location>,
}

impl LocationSubscription {
    pub fn vehicle_id(&self) -> Uuid {
        self.vehicle_id
    }

    /// Siguiente ubicación, o `None` cuando el canal se cierra.
    /// Si el suscriptor se queda atrás se saltan los eventos perdidos.
    pub async fn recv(&mut self) -> Option<Location> {
        loop {
            match self.receiver.recv().await {
                Ok(location) => return Some(location),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("⚠️ Suscriptor de {} perdió {} ubicaciones", self.vehicle_id, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

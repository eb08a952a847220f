//! Stream de ubicaciones en vivo
//!
//! WebSocket en `/vehicles/:id/locations/stream`. Cada ubicación aceptada
//! se envía como texto `"(lat, lng)"`.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::Location;
use crate::services::LocationSubscription;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn stream_locations(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let subscription = state.vehicles.watch_locations(id).await?;
    Ok(ws.on_upgrade(move |socket| forward_locations(socket, subscription)))
}

async fn forward_locations(socket: WebSocket, mut subscription: LocationSubscription) {
    let vehicle_id = subscription.vehicle_id();
    let (mut sender, mut receiver) = socket.split();
    info!("🔌 Stream abierto para vehículo {}", vehicle_id);

    loop {
        tokio::select! {
            location = subscription.recv() => {
                let Some(location) = location else {
                    // Vehículo eliminado
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                };
                if sender.send(Message::Text(location_frame(&location))).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(frame)) => debug!("📨 Frame recibido de {}: {:?}", vehicle_id, frame),
                }
            }
        }
    }

    info!("🔌 Stream cerrado para vehículo {}", vehicle_id);
}

pub fn location_frame(location: &Location) -> String {
    format!("({}, {})", location.lat, location.lng)
}

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check simple
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let geofence = state.vehicles.geofence();
    Json(json!({
        "service": "vehicle-tracking",
        "status": "ok",
        "environment": state.config.environment,
        "geofence": {
            "lat": geofence.center.lat,
            "lng": geofence.center.lng,
            "radius_km": geofence.radius_km,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

//! Vehicle tracking backend
//!
//! Registro de vehículos, historial de ubicaciones GPS dentro de una
//! geocerca y stream en vivo de ubicaciones por WebSocket.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_layer;
use state::AppState;

/// Crear el router principal de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(routes::health_routes::create_health_router())
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

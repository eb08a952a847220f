use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use super::location_stream_routes::stream_locations;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, LocationResponse, UpdateLocationRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/locations", post(update_location))
        .route("/:id/locations", get(list_locations))
        .route("/:id/locations/stream", get(stream_locations))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<StatusCode, AppError> {
    state.vehicles.create_vehicle(request.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let vehicles = state.vehicles.find_vehicles().await?;
    Ok(Json(vehicles.into_iter().map(VehicleResponse::from).collect()))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.vehicles.delete_vehicle(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found_error("Vehicle", &id.to_string()))
    }
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<StatusCode, AppError> {
    state.vehicles.location_update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_locations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let locations = state.vehicles.find_locations(id).await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

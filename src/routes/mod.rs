pub mod health_routes;
pub mod location_stream_routes;
pub mod vehicle_routes;

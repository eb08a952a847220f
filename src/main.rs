use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_tracking::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_tracking::create_app;
use vehicle_tracking::database;
use vehicle_tracking::repositories::{InMemoryVehicleRepository, PgVehicleRepository, VehicleRepository};
use vehicle_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Vehicle Tracking API");
    info!("================================================");

    // Inicializar almacén
    let repository: Arc<dyn VehicleRepository> = match &config.database_url {
        Some(url) => {
            let db_config = DatabaseConfig::new(url.clone(), config.db_max_connections);
            let pool = match database::connect(&db_config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            Arc::new(PgVehicleRepository::new(pool))
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando almacén en memoria");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let geofence = config.geofence;
    info!(
        "📍 Geocerca: ({}, {}) radio {} km",
        geofence.center.lat, geofence.center.lng, geofence.radius_km
    );

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_app(AppState::new(repository, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   POST   /vehicles - Registrar vehículo");
    info!("   GET    /vehicles - Listar vehículos");
    info!("   DELETE /vehicles/:id - Eliminar vehículo");
    info!("   POST   /vehicles/:id/locations - Actualizar ubicación");
    info!("   GET    /vehicles/:id/locations - Historial de ubicaciones");
    info!("   WS     /vehicles/:id/locations/stream - Ubicaciones en vivo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

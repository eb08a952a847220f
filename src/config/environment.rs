//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::services::location_events::DEFAULT_STREAM_BUFFER;
use crate::utils::geo::{Geofence, Point, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_RADIUS_KM};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Sin DATABASE_URL se usa el almacén en memoria
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Vacío = CORS permisivo
    pub cors_origins: Vec<String>,
    pub geofence: Geofence,
    pub stream_buffer: usize,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: None,
            db_max_connections: 20,
            cors_origins: Vec::new(),
            geofence: Geofence::default(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
            log_level: tracing::Level::DEBUG,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let default_level = if environment == "development" {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let geofence = Geofence::new(
            Point::new(
                parse_or(var("GEOFENCE_LAT"), "GEOFENCE_LAT", DEFAULT_CENTER_LAT)?,
                parse_or(var("GEOFENCE_LNG"), "GEOFENCE_LNG", DEFAULT_CENTER_LNG)?,
            ),
            parse_or(var("GEOFENCE_RADIUS_KM"), "GEOFENCE_RADIUS_KM", DEFAULT_RADIUS_KM)?,
        );
        if geofence.radius_km.is_nan() || geofence.radius_km <= 0.0 {
            return Err(anyhow!("GEOFENCE_RADIUS_KM must be positive"));
        }

        Ok(Self {
            port: parse_or(var("PORT"), "PORT", 3000)?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url: var("DATABASE_URL"),
            db_max_connections: parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 20)?,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            geofence,
            stream_buffer: parse_or(var("STREAM_BUFFER"), "STREAM_BUFFER", DEFAULT_STREAM_BUFFER)?,
            log_level: parse_or(var("LOG_LEVEL"), "LOG_LEVEL", default_level)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| anyhow!("{}", e))
            .with_context(|| format!("{} must be a valid value, got '{}'", key, raw)),
        None => Ok(default),
    }
}

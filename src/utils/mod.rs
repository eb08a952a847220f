//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores
//! y cálculos geográficos.

pub mod errors;
pub mod geo;

pub use errors::{AppError, AppResult};
pub use geo::{Geofence, Point};

//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean
//! al schema PostgreSQL.

pub mod location;
pub mod vehicle;

pub use location::Location;
pub use vehicle::Vehicle;

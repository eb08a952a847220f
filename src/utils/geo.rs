//! Utilidades geográficas
//!
//! Distancia de gran círculo (fórmula de haversine) y la geocerca que
//! filtra las actualizaciones de ubicación.

use serde::{Deserialize, Serialize};

/// Radio de la Tierra en km
pub const EARTH_RADIUS_KM: f64 = 6371.01;

/// Centro por defecto de la geocerca (Berlín)
pub const DEFAULT_CENTER_LAT: f64 = 52.53;
pub const DEFAULT_CENTER_LNG: f64 = 13.403;

/// Radio por defecto de la geocerca en km
pub const DEFAULT_RADIUS_KM: f64 = 3.5;

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Distancia en km hasta otro punto
    pub fn distance(&self, other: &Point) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Distancia de gran círculo en km entre dos puntos.
pub fn haversine_km(from: Point, to: Point) -> f64 {
    let lat_diff = (to.lat - from.lat).to_radians();
    let lng_diff = (to.lng - from.lng).to_radians();

    let a = (lat_diff / 2.0).sin() * (lat_diff / 2.0).sin()
        + from.lat.to_radians().cos()
            * to.lat.to_radians().cos()
            * (lng_diff / 2.0).sin()
            * (lng_diff / 2.0).sin();

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Zona circular dentro de la cual se aceptan ubicaciones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub center: Point,
    pub radius_km: f64,
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            center: Point::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl Geofence {
    pub fn new(center: Point, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Distancia en km desde el centro
    pub fn distance_from_center(&self, point: &Point) -> f64 {
        self.center.distance(point)
    }

    /// El borde cuenta como dentro
    pub fn contains(&self, point: &Point) -> bool {
        self.distance_from_center(point) <= self.radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point() {
        let p1 = Point::new(53.53, 13.403);
        let p2 = Point::new(53.53, 13.403);

        assert_eq!(p1.distance(&p2), 0.0);
    }

    #[test]
    fn test_distance_lisbon_berlin() {
        let lisbon = Point::new(38.71667, -9.13333);
        let berlin = Point::new(52.520008, 13.404954);

        let result = lisbon.distance(&berlin);

        assert!((result - 2311.16).abs() <= 1.1, "distance was {}", result);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(52.53, 13.403);
        let b = Point::new(52.50, 13.45);

        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 1° de latitud ≈ 111.2 km con R = 6371.01
        let dist = haversine_km(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((dist - 111.195).abs() < 0.01, "distance was {}", dist);
    }

    #[test]
    fn test_default_geofence() {
        let fence = Geofence::default();

        assert!(fence.contains(&Point::new(52.53, 13.403)));
        assert!(fence.contains(&Point::new(52.52, 13.41)));
        // Lisboa queda muy lejos
        assert!(!fence.contains(&Point::new(38.71667, -9.13333)));
        // ~5.5 km al norte del centro
        assert!(!fence.contains(&Point::new(52.58, 13.403)));
    }

    #[test]
    fn test_geofence_boundary_is_inside() {
        let center = Point::new(52.53, 13.403);
        let edge = Point::new(52.55, 13.42);
        let fence = Geofence::new(center, center.distance(&edge));

        assert!(fence.contains(&edge));
        assert!(!fence.contains(&Point::new(52.5501, 13.4201)));
    }

    #[test]
    fn test_custom_geofence() {
        let fence = Geofence::new(Point::new(0.0, 0.0), 200.0);

        assert!(fence.contains(&Point::new(1.0, 0.0)));
        assert!(!fence.contains(&Point::new(2.0, 0.0)));
    }
}

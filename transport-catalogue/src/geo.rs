//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::Deserialize;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite latitude in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Haversine great-circle distance between two points, in metres.
///
/// Identical points always yield exactly `0.0`.
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(Coordinates::new(55.611087, 37.20829).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(90.5, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
        assert!(!Coordinates::new(f64::NEG_INFINITY, 0.0).is_valid());
    }

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(55.611087, 37.20829);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        let d = great_circle_distance(a, b);
        // 2 * pi * R / 360
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Coordinates::new(55.595884, 37.209755);
        let b = Coordinates::new(55.632761, 37.333324);
        assert_eq!(great_circle_distance(a, b), great_circle_distance(b, a));
    }

    #[test]
    fn display() {
        let p = Coordinates::new(1.5, -2.25);
        assert_eq!(p.to_string(), "(1.500000, -2.250000)");
    }
}

//! Geographic coordinates and great-circle distances.

use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean radius of the Earth in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Maps the coordinate onto a plane, with longitude on the x-axis
    /// and latitude on the y-axis.
    pub fn to_point(self) -> Point2d {
        Point2d::new(self.lng, self.lat)
    }

    /// The inverse of [Coordinate::to_point].
    pub fn from_point(point: Point2d) -> Self {
        Self::new(point.y, point.x)
    }

    /// The great-circle distance to another coordinate in km.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(*self, *other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Computes the great-circle distance between two coordinates in km
/// using the Haversine formula.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn same_point_is_zero_km() {
        let p = Coordinate::new(12.9716, 77.5946);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        assert_approx_eq!(distance_km(a, b), 111.195, 0.01);
    }

    #[test]
    fn symmetric() {
        let a = Coordinate::new(12.9716, 77.6197);
        let b = Coordinate::new(12.9850, 77.5600);
        assert_approx_eq!(a.distance_km(&b), b.distance_km(&a));
        assert_approx_eq!(a.distance_km(&b), 6.638, 0.01);
    }

    #[test]
    fn point_round_trip_keeps_axes() {
        let c = Coordinate::new(12.5, 77.25);
        let p = c.to_point();
        assert_eq!((p.x, p.y), (77.25, 12.5));
        assert_eq!(Coordinate::from_point(p), c);
    }
}

//! Curved routes between two coordinates.

use crate::geo::{distance_km, Coordinate};
use crate::math::{interior_samples, rot90, try_normalize, QuadraticBezier2d};
use cgmath::prelude::*;
use itertools::Itertools;

/// How far the control point is pushed off the straight line, in degrees.
pub const CURVE_INTENSITY: f64 = 0.1;

/// The number of points sampled between the two ends of a route.
pub const INTERIOR_POINTS: usize = 50;

/// An ordered, non-empty sequence of waypoints from an origin to a destination.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    waypoints: Vec<Coordinate>,
}

impl Route {
    /// Generates a route with the default curve parameters.
    /// [Read more](generate_route).
    pub fn generate(origin: Coordinate, destination: Coordinate) -> Self {
        generate_route(origin, destination)
    }

    /// A route consisting of a single waypoint. There is nothing to drive.
    pub fn point(at: Coordinate) -> Self {
        Self {
            waypoints: vec![at],
        }
    }

    /// Creates a route from explicit waypoints, or `None` if there are none.
    pub fn from_waypoints(waypoints: Vec<Coordinate>) -> Option<Self> {
        if waypoints.is_empty() {
            None
        } else {
            Some(Self { waypoints })
        }
    }

    /// The number of waypoints, including both ends.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; a route has at least one waypoint.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The waypoints in travel order.
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    /// Gets a waypoint by index.
    pub fn get(&self, idx: usize) -> Option<Coordinate> {
        self.waypoints.get(idx).copied()
    }

    pub fn origin(&self) -> Coordinate {
        self.waypoints[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// The waypoint at a fraction of the route, `route[floor(fraction * len)]`,
    /// clamped to the last waypoint.
    pub fn at_fraction(&self, fraction: f64) -> Coordinate {
        let idx = (fraction.max(0.0) * self.len() as f64).floor() as usize;
        self.waypoints[idx.min(self.len() - 1)]
    }

    /// The straight-line (great-circle) distance between the two ends in km.
    pub fn direct_distance_km(&self) -> f64 {
        distance_km(self.origin(), self.destination())
    }

    /// The length of the polyline through all waypoints in km.
    pub fn path_length_km(&self) -> f64 {
        self.waypoints
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance_km(*a, *b))
            .sum()
    }
}

/// Computes the control point of the route's bezier curve.
///
/// The control point sits [CURVE_INTENSITY] degrees from the midpoint of the
/// two ends, perpendicular to the line between them. Coincident ends have no
/// direction, so the control point is the origin itself.
pub fn control_point(origin: Coordinate, destination: Coordinate, intensity: f64) -> Coordinate {
    let start = origin.to_point();
    let end = destination.to_point();
    match try_normalize(end - start) {
        Some(dir) => {
            let mid = start.midpoint(end);
            Coordinate::from_point(mid + intensity * rot90(dir))
        }
        None => origin,
    }
}

/// Generates a route of `INTERIOR_POINTS + 2` waypoints along a quadratic
/// bezier curve from `origin` to `destination`.
///
/// The two ends are copied exactly; only the interior points are sampled.
pub fn generate_route(origin: Coordinate, destination: Coordinate) -> Route {
    generate_route_with(origin, destination, CURVE_INTENSITY, INTERIOR_POINTS)
}

/// Generates a route with an explicit curve intensity and interior point count.
pub fn generate_route_with(
    origin: Coordinate,
    destination: Coordinate,
    intensity: f64,
    interior_points: usize,
) -> Route {
    let control = control_point(origin, destination, intensity);
    let curve = QuadraticBezier2d::new(&[
        origin.to_point(),
        control.to_point(),
        destination.to_point(),
    ]);

    let mut waypoints = Vec::with_capacity(interior_points + 2);
    waypoints.push(origin);
    waypoints.extend(interior_samples(&curve, interior_points).map(Coordinate::from_point));
    waypoints.push(destination);

    log::trace!(
        "generated route of {} waypoints via control point {:?}",
        waypoints.len(),
        control
    );
    Route { waypoints }
}

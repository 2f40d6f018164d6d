//! Synthetic traffic density along a route.

use crate::util::Interval;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How congested the road is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrafficDensity {
    Light,
    Moderate,
    Heavy,
}

impl fmt::Display for TrafficDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrafficDensity::Light => "light",
            TrafficDensity::Moderate => "moderate",
            TrafficDensity::Heavy => "heavy",
        };
        f.pad(name)
    }
}

/// The traffic conditions over a band of route progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrafficZone {
    /// The progress fractions covered by the zone, `[min, max)`.
    pub band: Interval<f64>,
    pub density: TrafficDensity,
    /// The vehicle speed before signal and priority adjustments, in km/h.
    pub base_speed_kmh: f64,
    /// The time between ticks before signal and priority adjustments.
    pub base_step: Duration,
}

/// The zones in order of progress. Together they cover `[0, 1)`.
pub const ZONES: [TrafficZone; 3] = [
    TrafficZone {
        band: Interval::new(0.0, 0.3),
        density: TrafficDensity::Light,
        base_speed_kmh: 65.0,
        base_step: Duration::from_millis(1200),
    },
    TrafficZone {
        band: Interval::new(0.3, 0.6),
        density: TrafficDensity::Moderate,
        base_speed_kmh: 45.0,
        base_step: Duration::from_millis(1800),
    },
    TrafficZone {
        band: Interval::new(0.6, 1.0),
        density: TrafficDensity::Heavy,
        base_speed_kmh: 30.0,
        base_step: Duration::from_millis(2400),
    },
];

/// Gets the traffic zone for a progress fraction.
///
/// Values below zero fall into the first zone and values of one or more into
/// the last.
pub fn zone_for(progress: f64) -> TrafficZone {
    ZONES
        .iter()
        .find(|zone| zone.band.contains_half_open(progress))
        .copied()
        .unwrap_or(if progress < ZONES[0].band.min {
            ZONES[0]
        } else {
            ZONES[ZONES.len() - 1]
        })
}

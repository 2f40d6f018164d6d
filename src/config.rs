//! Tunable engine parameters.

use crate::error::Error;
use crate::journey::NOMINAL_JOURNEY_MINUTES;
use crate::route::{CURVE_INTENSITY, INTERIOR_POINTS};
use crate::signal::SignalRules;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The parameters of a [MotionSimulator](crate::MotionSimulator).
///
/// The defaults reproduce the reference behaviour. The traffic zone table is
/// fixed and not part of the configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Perpendicular offset of the route's control point, in degrees.
    pub curve_intensity: f64,
    /// The number of waypoints between the two ends of a route.
    pub interior_points: usize,
    pub signals: SignalRules,
    /// Speed lost near a signal, in km/h.
    pub signal_slowdown_kmh: f64,
    /// The lowest speed near a signal, in km/h.
    pub signal_min_speed_kmh: f64,
    /// Step duration multiplier near a signal.
    pub signal_step_factor: f64,
    /// Speed gained on a critical run, in km/h.
    pub critical_boost_kmh: f64,
    /// The highest speed of a critical run, in km/h.
    pub critical_max_speed_kmh: f64,
    /// Step duration multiplier on a critical run.
    pub critical_step_factor: f64,
    /// The assumed door-to-door journey time used for the displayed ETA.
    pub nominal_journey_minutes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            curve_intensity: CURVE_INTENSITY,
            interior_points: INTERIOR_POINTS,
            signals: SignalRules::default(),
            signal_slowdown_kmh: 20.0,
            signal_min_speed_kmh: 10.0,
            signal_step_factor: 1.5,
            critical_boost_kmh: 15.0,
            critical_max_speed_kmh: 80.0,
            critical_step_factor: 0.8,
            nominal_journey_minutes: NOMINAL_JOURNEY_MINUTES,
        }
    }
}

impl EngineConfig {
    /// Checks that the parameters describe a usable engine.
    pub fn validate(&self) -> Result<(), Error> {
        let finite = [
            self.curve_intensity,
            self.signals.clear_lead,
            self.signals.proximity,
            self.signals.final_stretch,
            self.signal_slowdown_kmh,
            self.signal_min_speed_kmh,
            self.signal_step_factor,
            self.critical_boost_kmh,
            self.critical_max_speed_kmh,
            self.critical_step_factor,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig("parameters must be finite"));
        }
        if self.interior_points == 0 {
            return Err(Error::InvalidConfig("routes need at least one interior point"));
        }
        if self.signal_step_factor <= 0.0 || self.critical_step_factor <= 0.0 {
            return Err(Error::InvalidConfig("step factors must be positive"));
        }
        if self.signal_min_speed_kmh < 0.0 || self.critical_max_speed_kmh < 0.0 {
            return Err(Error::InvalidConfig("speed limits must not be negative"));
        }
        Ok(())
    }

    /// Parses a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

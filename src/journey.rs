//! Journey announcements and the displayed arrival estimate.
//!
//! The estimate assumes a fixed journey time and ignores how the simulated
//! vehicle is actually doing, so it may disagree with the simulator.

#[cfg(feature = "serde")]
use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// The journey time assumed by the arrival estimate, in minutes.
pub const NOMINAL_JOURNEY_MINUTES: u64 = 15;

/// Announces that a vehicle has set off.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Journey {
    pub pickup_location: String,
    pub drop_location: String,
    /// Encoded as an ISO-8601 timestamp.
    pub start_time: DateTime<Utc>,
    /// The dispatch area the vehicle belongs to.
    pub area: String,
    pub is_critical: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_simulating: bool,
}

impl Journey {
    /// Creates an announcement for a journey starting now.
    pub fn begin(pickup: &str, drop: &str, area: &str, critical: bool) -> Self {
        Self {
            pickup_location: pickup.to_owned(),
            drop_location: drop.to_owned(),
            start_time: Utc::now(),
            area: area.to_owned(),
            is_critical: critical,
            is_simulating: true,
        }
    }

    /// Whether the drop location mentions any of the keywords, ignoring case.
    /// A receiving hospital uses this to pick out journeys heading its way.
    pub fn is_bound_for(&self, keywords: &[&str]) -> bool {
        let destination = self.drop_location.to_lowercase();
        keywords
            .iter()
            .any(|keyword| destination.contains(&keyword.to_lowercase()))
    }

    /// The minutes left of a journey expected to take `nominal_minutes`.
    pub fn remaining_minutes(&self, now: DateTime<Utc>, nominal_minutes: u64) -> u64 {
        eta_remaining_minutes(self.start_time, now, nominal_minutes)
    }

    /// The expected arrival time of a journey taking `nominal_minutes`.
    /// Saturates at the latest representable time.
    pub fn estimated_arrival(&self, nominal_minutes: u64) -> DateTime<Utc> {
        i64::try_from(nominal_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|d| self.start_time.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The whole minutes left of a journey of `nominal_minutes` that started at
/// `start`, never negative.
pub fn eta_remaining_minutes(
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    nominal_minutes: u64,
) -> u64 {
    let elapsed = now.signed_duration_since(start).num_minutes().max(0) as u64;
    nominal_minutes.saturating_sub(elapsed)
}

/// Renders the remaining time for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EtaLabel(pub u64);

impl fmt::Display for EtaLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("Arriving Now"),
            1 => f.write_str("1 minute"),
            n => write!(f, "{} minutes", n),
        }
    }
}

//! A route simulation engine for emergency vehicles.
//!
//! Two place names are resolved to coordinates, joined by a curved route,
//! and a [MotionSimulator] drives a vehicle along it. Its speed and tick rate
//! vary with synthetic traffic, nearby signals and whether the run is critical.

pub use cgmath;
pub use config::EngineConfig;
pub use error::Error;
pub use fleet::Fleet;
pub use gazetteer::{resolve, DEFAULT_COORDINATE};
pub use geo::{distance_km, Coordinate};
pub use journey::{eta_remaining_minutes, EtaLabel, Journey};
pub use route::{generate_route, Route};
pub use signal::{is_near_signal, signal_states, LightState, Signal, SignalState};
pub use simulator::{MotionSimulator, Observer, Snapshot, Status, StepPlan};
use slotmap::new_key_type;
pub use traffic::{zone_for, TrafficDensity, TrafficZone};
pub use util::Interval;

pub mod clock;
mod config;
pub mod cosmetic;
mod error;
mod fleet;
pub mod gazetteer;
mod geo;
pub mod journey;
pub mod math;
pub mod route;
pub mod signal;
mod simulator;
pub mod traffic;
mod util;

new_key_type! {
    /// Unique ID of a [MotionSimulator] in a [Fleet].
    pub struct SimulatorId;
}

//! A set of independently simulated vehicles.

use crate::config::EngineConfig;
use crate::simulator::{MotionSimulator, Snapshot, Status};
use crate::SimulatorId;
use slotmap::SlotMap;
use std::time::Duration;

/// Tracks several vehicles at once, each with its own simulator and clock.
///
/// Removing a vehicle drops its simulator together with any pending tick.
#[derive(Default)]
pub struct Fleet {
    config: EngineConfig,
    simulators: SlotMap<SimulatorId, MotionSimulator>,
}

impl Fleet {
    /// Creates an empty fleet whose simulators use the given parameters.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            simulators: SlotMap::with_key(),
        }
    }

    /// Adds an idle vehicle driving between two named places.
    pub fn dispatch(&mut self, origin: &str, destination: &str, critical: bool) -> SimulatorId {
        let mut simulator = MotionSimulator::new(self.config);
        simulator.configure(origin, destination, critical);
        self.simulators.insert(simulator)
    }

    /// Adds a simulator built elsewhere.
    pub fn insert(&mut self, simulator: MotionSimulator) -> SimulatorId {
        self.simulators.insert(simulator)
    }

    /// Removes a vehicle, returning its simulator stopped.
    pub fn remove(&mut self, id: SimulatorId) -> Option<MotionSimulator> {
        let mut simulator = self.simulators.remove(id)?;
        simulator.stop();
        Some(simulator)
    }

    pub fn get(&self, id: SimulatorId) -> Option<&MotionSimulator> {
        self.simulators.get(id)
    }

    pub fn get_mut(&mut self, id: SimulatorId) -> Option<&mut MotionSimulator> {
        self.simulators.get_mut(id)
    }

    /// Advances every simulator's clock by `dt`.
    pub fn advance_all(&mut self, dt: Duration) {
        for simulator in self.simulators.values_mut() {
            simulator.advance(dt);
        }
    }

    /// Returns an iterator over every vehicle's snapshot.
    pub fn snapshots(&self) -> impl Iterator<Item = (SimulatorId, Snapshot)> + '_ {
        self.simulators.iter().map(|(id, sim)| (id, sim.snapshot()))
    }

    /// The number of simulators that are still running.
    pub fn running(&self) -> usize {
        self.simulators
            .values()
            .filter(|sim| sim.status() == Status::Running)
            .count()
    }

    pub fn len(&self) -> usize {
        self.simulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulators.is_empty()
    }
}

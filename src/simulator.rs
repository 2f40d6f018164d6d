use crate::clock::{TickHandle, Timer};
use crate::config::EngineConfig;
use crate::gazetteer::{resolve, DEFAULT_COORDINATE};
use crate::geo::Coordinate;
use crate::route::{generate_route_with, Route};
use crate::signal::{place_signals, Signal, SignalState};
use crate::traffic::{zone_for, TrafficDensity};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

/// The lifecycle of a simulation run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Idle,
    Running,
    Completed,
}

/// The observable state of a simulator, published after every change.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    /// The index of the current waypoint.
    pub position_index: usize,
    /// The current waypoint.
    pub position: Coordinate,
    /// Progress through the route's waypoints, from 0 to 100.
    pub progress_percent: f64,
    /// The vehicle speed in km/h.
    pub speed_kmh: f64,
    pub density: TrafficDensity,
    pub status: Status,
}

/// The speed and timing computed for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepPlan {
    /// The progress fraction the plan was computed for.
    pub progress: f64,
    pub density: TrafficDensity,
    /// The vehicle speed in km/h.
    pub speed_kmh: f64,
    /// The delay before the following tick.
    pub step: Duration,
    /// Whether the signal slowdown was applied.
    pub near_signal: bool,
}

/// Receives published snapshots.
pub trait Observer {
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> Observer for F {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Simulates an emergency vehicle driving along a route.
///
/// Each simulator owns its own virtual clock holding at most one pending
/// tick. Time only passes through [MotionSimulator::advance], and every
/// transition that resets the run cancels the pending tick, so nothing can
/// fire after a stop or once the simulator is dropped.
pub struct MotionSimulator {
    /// The engine parameters.
    config: EngineConfig,
    /// The route being driven.
    route: Route,
    /// The signals along the current route.
    signals: [Signal; 5],
    /// Whether this is a critical run.
    critical: bool,
    /// The index of the current waypoint.
    index: usize,
    /// Progress from 0 to 100.
    progress: f64,
    /// The speed in km/h.
    speed: f64,
    /// The most recent traffic density.
    density: TrafficDensity,
    /// The run status.
    status: Status,
    /// The clock driving the ticks.
    timer: Timer,
    /// The number of ticks executed in the current run.
    ticks: usize,
    /// Snapshot subscribers.
    observers: SmallVec<[Box<dyn Observer>; 2]>,
}

impl Default for MotionSimulator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MotionSimulator {
    /// Creates an idle simulator with a single-point route at the city centre.
    /// Call [configure](Self::configure) or [set_route](Self::set_route) before starting.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_route(config, Route::point(DEFAULT_COORDINATE), false)
    }

    /// Creates an idle simulator for the given route.
    pub fn with_route(config: EngineConfig, route: Route, critical: bool) -> Self {
        Self {
            config,
            signals: place_signals(&route),
            route,
            critical,
            index: 0,
            progress: 0.0,
            speed: 0.0,
            density: TrafficDensity::Light,
            status: Status::Idle,
            timer: Timer::new(),
            ticks: 0,
            observers: SmallVec::new(),
        }
    }

    /// Resolves the two place names, regenerates the route and resets to idle.
    pub fn configure(&mut self, origin: &str, destination: &str, critical: bool) {
        let from = resolve(origin);
        let to = resolve(destination);
        let route = generate_route_with(
            from,
            to,
            self.config.curve_intensity,
            self.config.interior_points,
        );
        log::info!(
            "configured {:?} -> {:?} ({:.2} km direct, critical: {})",
            origin,
            destination,
            route.direct_distance_km(),
            critical
        );
        self.critical = critical;
        self.set_route(route);
    }

    /// Replaces the route and resets to idle.
    pub fn set_route(&mut self, route: Route) {
        self.signals = place_signals(&route);
        self.route = route;
        self.stop();
    }

    /// Changes the critical flag without interrupting the run.
    ///
    /// A tick that is already scheduled keeps its delay; the flag applies from
    /// the next step computed.
    pub fn set_critical(&mut self, critical: bool) {
        self.critical = critical;
    }

    /// Starts a run from the first waypoint, cancelling any run in progress.
    ///
    /// Does nothing if the route has fewer than two waypoints.
    pub fn start(&mut self) {
        if self.route.len() < 2 {
            log::warn!("refusing to start: route has {} waypoint(s)", self.route.len());
            return;
        }
        self.reset();
        self.status = Status::Running;
        let plan = self.plan_step(0.0);
        self.density = plan.density;
        self.timer.schedule(plan.step);
        log::info!(
            "started a {} run over {} waypoints",
            if self.critical { "critical" } else { "normal" },
            self.route.len()
        );
        self.publish();
    }

    /// Cancels the run and discards its progress.
    pub fn stop(&mut self) {
        let was = self.status;
        self.reset();
        if was != Status::Idle {
            log::info!("stopped a {:?} run", was);
        }
        self.publish();
    }

    /// Advances the simulator's clock by `dt`, executing every tick that falls due.
    ///
    /// The clock saturates at [Duration::MAX], so `advance(Duration::MAX)` runs
    /// everything that is left.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timer.now().saturating_add(dt);
        while let Some(handle) = self.timer.take_due(until) {
            self.tick(handle);
        }
        self.timer.settle(until);
    }

    /// Advances the clock until the run ends, returning the number of ticks executed.
    ///
    /// Returns immediately unless the simulator is running.
    pub fn run_to_completion(&mut self) -> usize {
        let before = self.ticks;
        while let Some(handle) = self.timer.pending() {
            let dt = handle.due().saturating_sub(self.timer.now());
            self.advance(dt);
        }
        self.ticks - before
    }

    /// Computes the speed and timing for a step at the given progress fraction.
    pub fn plan_step(&self, progress: f64) -> StepPlan {
        let zone = zone_for(progress);
        let mut speed = zone.base_speed_kmh;
        let mut step_ms = zone.base_step.as_millis() as f64;

        let near_signal = self.config.signals.is_near(progress);
        if near_signal {
            speed = f64::max(
                self.config.signal_min_speed_kmh,
                speed - self.config.signal_slowdown_kmh,
            );
            step_ms *= self.config.signal_step_factor;
        }

        if self.critical {
            step_ms *= self.config.critical_step_factor;
            speed = f64::min(
                self.config.critical_max_speed_kmh,
                speed + self.config.critical_boost_kmh,
            );
        }

        StepPlan {
            progress,
            density: zone.density,
            speed_kmh: speed,
            step: Duration::from_micros((step_ms * 1000.0).round() as u64),
            near_signal,
        }
    }

    /// Gets the current observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position_index: self.index,
            position: self.position(),
            progress_percent: self.progress,
            speed_kmh: self.speed,
            density: self.density,
            status: self.status,
        }
    }

    /// Evaluates the route's signals for the current progress.
    pub fn signal_states(&self) -> [SignalState; 5] {
        self.config.signals.states(self.progress / 100.0)
    }

    /// The signals placed along the current route.
    pub fn signals(&self) -> &[Signal; 5] {
        &self.signals
    }

    /// Subscribes to snapshots. The observer receives one snapshot per tick,
    /// start, and stop.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// The simulator's clock time.
    pub fn now(&self) -> Duration {
        self.timer.now()
    }

    /// The pending tick, if the simulator is running.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.timer.pending()
    }

    /// Executes one tick.
    fn tick(&mut self, handle: TickHandle) {
        if self.status != Status::Running {
            return;
        }

        let len = self.route.len();
        let plan = self.plan_step(self.index as f64 / len as f64);

        self.index += 1;
        self.ticks += 1;
        self.progress = 100.0 * self.index as f64 / len as f64;
        self.speed = plan.speed_kmh;
        self.density = plan.density;

        if self.index >= len - 1 {
            self.index = len - 1;
            self.progress = 100.0;
            self.speed = 0.0;
            self.status = Status::Completed;
            log::info!(
                "completed after {} ticks at {:.1}s",
                self.ticks,
                handle.due().as_secs_f64()
            );
        } else {
            self.timer.schedule(plan.step);
            log::debug!(
                "tick {}: {:.1}% at {} km/h, {} traffic{}, next in {:?}",
                self.index,
                self.progress,
                self.speed,
                self.density,
                if plan.near_signal { ", near signal" } else { "" },
                plan.step
            );
        }
        self.publish();
    }

    /// Cancels the pending tick and returns to the idle state.
    fn reset(&mut self) {
        if self.timer.cancel() {
            log::trace!("cancelled pending tick");
        }
        self.index = 0;
        self.progress = 0.0;
        self.speed = 0.0;
        self.density = TrafficDensity::Light;
        self.status = Status::Idle;
        self.ticks = 0;
    }

    fn position(&self) -> Coordinate {
        self.route
            .get(self.index)
            .unwrap_or_else(|| self.route.destination())
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo::Coordinate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn simulator(critical: bool) -> MotionSimulator {
        let route = Route::generate(
            Coordinate::new(12.9716, 77.6197),
            Coordinate::new(12.9850, 77.5600),
        );
        MotionSimulator::with_route(EngineConfig::default(), route, critical)
    }

    fn recorder(sim: &mut MotionSimulator) -> Rc<RefCell<Vec<Snapshot>>> {
        let log = Rc::new(RefCell::new(vec![]));
        let sink = log.clone();
        sim.subscribe(move |s: &Snapshot| sink.borrow_mut().push(*s));
        log
    }

    #[test]
    fn starts_idle() {
        let sim = simulator(false);
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.status, Status::Idle);
        assert_eq!(snapshot.position_index, 0);
        assert_eq!(snapshot.progress_percent, 0.0);
        assert!(sim.pending_tick().is_none());
    }

    #[test]
    fn short_routes_do_not_start() {
        let mut sim = MotionSimulator::default();
        sim.start();
        assert_eq!(sim.status(), Status::Idle);
        assert!(sim.pending_tick().is_none());
    }

    #[test]
    fn first_tick_uses_the_initial_step() {
        let mut sim = simulator(false);
        sim.start();
        assert_eq!(sim.pending_tick().unwrap().due(), Duration::from_millis(1200));
        sim.advance(Duration::from_millis(1199));
        assert_eq!(sim.snapshot().position_index, 0);
        sim.advance(Duration::from_millis(1));
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.position_index, 1);
        assert_eq!(snapshot.position, sim.route().get(1).unwrap());
        assert_eq!(snapshot.speed_kmh, 65.0);
        assert_eq!(snapshot.density, TrafficDensity::Light);
        assert_eq!(snapshot.progress_percent, 100.0 / 52.0);
    }

    #[test]
    fn slows_down_near_signals() {
        let sim = simulator(false);
        // 0.19 is near the first signal, in light traffic.
        let plan = sim.plan_step(0.19);
        assert!(plan.near_signal);
        assert_eq!(plan.speed_kmh, 45.0);
        assert_eq!(plan.step, Duration::from_millis(1800));
        // Heavy traffic never drops below the minimum.
        let plan = sim.plan_step(0.65);
        assert_eq!(plan.speed_kmh, 10.0);
        assert_eq!(plan.step, Duration::from_millis(3600));
    }

    #[test]
    fn critical_runs_are_faster() {
        let normal = simulator(false);
        let critical = simulator(true);
        for progress in [0.0, 0.1, 0.45, 0.7, 0.9] {
            let a = normal.plan_step(progress);
            let b = critical.plan_step(progress);
            assert!(!a.near_signal);
            assert!(b.step < a.step);
            assert!(b.speed_kmh > a.speed_kmh);
        }
        let plan = critical.plan_step(0.0);
        assert_eq!(plan.speed_kmh, 80.0);
        assert_eq!(plan.step, Duration::from_millis(960));
    }

    #[test]
    fn stop_discards_progress_and_freezes_state() {
        let mut sim = simulator(false);
        sim.start();
        sim.advance(Duration::from_secs(10));
        assert!(sim.snapshot().position_index > 0);

        sim.stop();
        let stopped = sim.snapshot();
        assert_eq!(stopped.status, Status::Idle);
        assert_eq!(stopped.position_index, 0);
        assert_eq!(stopped.progress_percent, 0.0);
        assert_eq!(stopped.speed_kmh, 0.0);

        sim.advance(Duration::from_secs(3600));
        assert_eq!(sim.snapshot(), stopped);
        assert!(sim.signal_states().iter().all(|s| !s.cleared));
    }

    #[test]
    fn restart_cancels_the_previous_run() {
        let mut sim = simulator(false);
        let log = recorder(&mut sim);
        sim.start();
        sim.advance(Duration::from_secs(5));
        sim.start();
        assert_eq!(sim.snapshot().position_index, 0);
        // Only the new run's tick is pending.
        let due = sim.pending_tick().unwrap().due();
        assert_eq!(due, sim.now() + Duration::from_millis(1200));
        sim.advance(Duration::from_millis(1200));
        assert_eq!(sim.snapshot().position_index, 1);
        let starts = log.borrow().iter().filter(|s| s.position_index == 0).count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn critical_change_applies_to_the_next_step_only() {
        let mut sim = simulator(false);
        sim.start();
        sim.set_critical(true);
        // The scheduled tick keeps its normal delay.
        assert_eq!(sim.pending_tick().unwrap().due(), Duration::from_millis(1200));
        sim.advance(Duration::from_millis(1200));
        assert_eq!(sim.snapshot().speed_kmh, 80.0);
        let next = sim.pending_tick().unwrap().due() - sim.now();
        assert_eq!(next, Duration::from_millis(960));
        assert_eq!(sim.status(), Status::Running);
    }

    #[test]
    fn completes_at_one_hundred_percent() {
        let mut sim = simulator(false);
        let log = recorder(&mut sim);
        sim.start();
        let ticks = sim.run_to_completion();
        assert_eq!(ticks, 51);

        let end = sim.snapshot();
        assert_eq!(end.status, Status::Completed);
        assert_eq!(end.progress_percent, 100.0);
        assert_eq!(end.speed_kmh, 0.0);
        assert_eq!(end.position_index, 51);
        assert_eq!(end.position, sim.route().destination());
        assert!(sim.pending_tick().is_none());
        assert!(sim.signal_states().iter().all(|s| s.cleared));

        let progress: Vec<_> = log.borrow().iter().map(|s| s.progress_percent).collect();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn advancing_to_the_end_of_time_finishes_the_run() {
        let mut sim = simulator(false);
        sim.start();
        sim.advance(Duration::from_secs(1));
        sim.advance(Duration::MAX);
        assert_eq!(sim.status(), Status::Completed);
        assert_eq!(sim.snapshot().progress_percent, 100.0);
        assert_eq!(sim.now(), Duration::MAX);

        // The clock is pinned, but a new run still completes.
        sim.start();
        sim.advance(Duration::MAX);
        assert_eq!(sim.status(), Status::Completed);
    }

    #[test]
    fn completed_runs_can_restart() {
        let mut sim = simulator(true);
        sim.start();
        sim.run_to_completion();
        sim.start();
        assert_eq!(sim.status(), Status::Running);
        assert_eq!(sim.snapshot().position_index, 0);
    }

    #[test]
    fn two_point_route_completes_in_one_tick() {
        let a = Coordinate::new(1.0, 1.0);
        let route = Route::from_waypoints(vec![a, a]).unwrap();
        let mut sim = MotionSimulator::with_route(EngineConfig::default(), route, false);
        sim.start();
        assert_eq!(sim.run_to_completion(), 1);
        assert_eq!(sim.status(), Status::Completed);
        assert_eq!(sim.snapshot().position, a);
    }

    #[test]
    fn configure_resets_a_running_simulator() {
        let mut sim = simulator(false);
        sim.start();
        sim.advance(Duration::from_secs(20));
        sim.configure("Whitefield", "Columbia Asia Hospital", true);
        assert_eq!(sim.status(), Status::Idle);
        assert!(sim.pending_tick().is_none());
        assert!(sim.is_critical());
        assert_eq!(sim.route().origin(), Coordinate::new(12.9698, 77.7500));
        assert_eq!(sim.signals()[0].coordinate, sim.route().get(10).unwrap());
    }
}

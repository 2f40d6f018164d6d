//! A virtual clock with a single cancellable pending tick.

use std::time::Duration;

/// A scheduled tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickHandle {
    due: Duration,
}

impl TickHandle {
    /// The clock time at which the tick falls due.
    pub fn due(&self) -> Duration {
        self.due
    }
}

/// A timer owning at most one pending tick.
///
/// Scheduling replaces the pending tick and cancelling drops it, so a
/// superseded tick can never fall due.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    /// The current clock time.
    now: Duration,
    /// The pending tick, if there is one.
    pending: Option<TickHandle>,
}

impl Timer {
    /// Creates a timer at time zero with nothing scheduled.
    pub fn new() -> Self {
        Default::default()
    }

    /// The current clock time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The pending tick, if there is one.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Schedules a tick `delay` after the current time, replacing any pending tick.
    /// The due time saturates at [Duration::MAX].
    pub fn schedule(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle {
            due: self.now.saturating_add(delay),
        };
        self.pending = Some(handle);
        handle
    }

    /// Cancels the pending tick. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Takes the pending tick if it falls due at or before `until`,
    /// moving the clock to its due time.
    pub(crate) fn take_due(&mut self, until: Duration) -> Option<TickHandle> {
        match self.pending {
            Some(handle) if handle.due <= until => {
                self.pending = None;
                self.now = self.now.max(handle.due);
                Some(handle)
            }
            _ => None,
        }
    }

    /// Moves the clock forward to `time`. Never moves it backwards.
    pub(crate) fn settle(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

#[cfg(test)]
mod test {
    use super::Timer;
    use std::time::Duration;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn ticks_fall_due_in_order() {
        let mut timer = Timer::new();
        let handle = timer.schedule(100 * MS);
        assert!(timer.take_due(99 * MS).is_none());
        assert_eq!(timer.take_due(150 * MS), Some(handle));
        assert_eq!(timer.now(), 100 * MS);
        assert!(timer.pending().is_none());
    }

    #[test]
    fn rescheduling_replaces_the_pending_tick() {
        let mut timer = Timer::new();
        timer.schedule(100 * MS);
        let second = timer.schedule(300 * MS);
        assert_eq!(timer.pending(), Some(second));
        assert!(timer.take_due(200 * MS).is_none());
        assert_eq!(timer.take_due(300 * MS), Some(second));
    }

    #[test]
    fn cancelled_ticks_never_fire() {
        let mut timer = Timer::new();
        timer.schedule(100 * MS);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(timer.take_due(Duration::from_secs(10)).is_none());
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut timer = Timer::new();
        timer.settle(50 * MS);
        timer.settle(10 * MS);
        assert_eq!(timer.now(), 50 * MS);
        let handle = timer.schedule(5 * MS);
        assert_eq!(handle.due(), 55 * MS);
    }

    #[test]
    fn scheduling_at_the_end_of_time_saturates() {
        let mut timer = Timer::new();
        timer.settle(Duration::MAX);
        let handle = timer.schedule(Duration::from_secs(1));
        assert_eq!(handle.due(), Duration::MAX);
        assert_eq!(timer.take_due(Duration::MAX), Some(handle));
    }
}

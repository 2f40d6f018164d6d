//! Random figures for display widgets.
//!
//! Nothing here feeds back into the simulation.

use rand::Rng;

/// A decorative badge shown next to a named signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignalBadge {
    /// The advertised wait at the signal, 1 to 3 minutes.
    pub wait_minutes: u8,
    /// Whether the badge reads "cleared".
    pub cleared: bool,
}

/// Probability that a badge reads "cleared".
const CLEARED_PROBABILITY: f64 = 0.7;

/// Generates one badge per signal name.
pub fn signal_badges<R: Rng + ?Sized>(names: &[&str], rng: &mut R) -> Vec<SignalBadge> {
    names
        .iter()
        .map(|_| SignalBadge {
            wait_minutes: rng.gen_range(1..=3),
            cleared: rng.gen_bool(CLEARED_PROBABILITY),
        })
        .collect()
}

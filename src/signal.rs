//! Traffic signals placed at fixed fractions of a route.

use crate::geo::Coordinate;
use crate::route::Route;
use std::borrow::Cow;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The route fractions at which signals are placed.
pub const SIGNAL_POSITIONS: [f64; 5] = [0.20, 0.35, 0.50, 0.65, 0.80];

/// The colour a signal shows to the approaching vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightState {
    Red,
    Green,
}

/// The state of one signal for a given progress.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalState {
    /// The signal's route fraction.
    pub position: f64,
    /// Whether the signal has been cleared for the vehicle.
    pub cleared: bool,
}

impl SignalState {
    pub fn light(&self) -> LightState {
        if self.cleared {
            LightState::Green
        } else {
            LightState::Red
        }
    }
}

/// The thresholds used to evaluate signals.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignalRules {
    /// How far ahead of the vehicle a signal turns green, as a route fraction.
    pub clear_lead: f64,
    /// The distance from a signal within which the vehicle slows down.
    pub proximity: f64,
    /// Past this fraction the vehicle no longer slows down for signals.
    pub final_stretch: f64,
}

impl Default for SignalRules {
    fn default() -> Self {
        Self {
            clear_lead: 0.05,
            proximity: 0.03,
            final_stretch: 0.98,
        }
    }
}

impl SignalRules {
    /// Evaluates every signal for the given progress fraction.
    ///
    /// A signal is cleared once `progress > position - clear_lead`, so for a
    /// run with non-decreasing progress a cleared signal stays cleared.
    pub fn states(&self, progress: f64) -> [SignalState; 5] {
        SIGNAL_POSITIONS.map(|position| SignalState {
            position,
            cleared: progress > position - self.clear_lead,
        })
    }

    /// Whether the vehicle is close enough to any signal to slow down.
    /// Cleared signals count too.
    pub fn is_near(&self, progress: f64) -> bool {
        progress < self.final_stretch
            && SIGNAL_POSITIONS
                .iter()
                .any(|position| (progress - position).abs() < self.proximity)
    }
}

/// Evaluates every signal with the default rules. [Read more](SignalRules::states).
pub fn signal_states(progress: f64) -> [SignalState; 5] {
    SignalRules::default().states(progress)
}

/// Checks signal proximity with the default rules. [Read more](SignalRules::is_near).
pub fn is_near_signal(progress: f64) -> bool {
    SignalRules::default().is_near(progress)
}

/// A signal located on a particular route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Signal {
    /// The 1-based signal number along the route.
    pub number: usize,
    /// The signal's route fraction.
    pub position: f64,
    /// Where the signal stands.
    pub coordinate: Coordinate,
}

/// Places the signals on a route, at `route[floor(position * len)]`.
pub fn place_signals(route: &Route) -> [Signal; 5] {
    let mut number = 0;
    SIGNAL_POSITIONS.map(|position| {
        number += 1;
        Signal {
            number,
            position,
            coordinate: route.at_fraction(position),
        }
    })
}

const NAMED_SIGNALS: &[(&str, &[&str])] = &[
    (
        "mg road",
        &[
            "Trinity Metro Station Signal",
            "Forum Mall Junction",
            "Residency Road Cross",
            "Richmond Circle",
            "Brigade Road Junction",
        ],
    ),
    (
        "rajajinagar",
        &[
            "Rajajinagar 2nd Block Signal",
            "Mantri Mall Signal",
            "Chord Road Junction",
            "Rajajinagar Metro Signal",
            "Chord Road Hospital",
        ],
    ),
    (
        "whitefield",
        &[
            "ITPL Main Gate Signal",
            "Whitefield Main Road Signal",
            "Varthur Kodi Junction",
            "Marathahalli Bridge",
            "Kundalahalli Signal",
        ],
    ),
    (
        "jayanagar",
        &[
            "Jayanagar 4th Block Signal",
            "South End Circle",
            "Lalbagh West Gate Signal",
            "Wilson Garden Signal",
        ],
    ),
    (
        "koramangala",
        &[
            "Koramangala 5th Block Signal",
            "Sony World Signal",
            "Koramangala Water Tank Signal",
            "Sarjapur Main Road Junction",
        ],
    ),
    (
        "hebbal",
        &[
            "Hebbal Flyover Signal",
            "Manyata Tech Park Signal",
            "Outer Ring Road Junction",
            "Nagawara Signal",
        ],
    ),
    (
        "vv puram",
        &[
            "VV Puram Food Street Signal",
            "Sajjan Rao Circle",
            "National College Metro Signal",
            "Basavanagudi Police Station",
        ],
    ),
    (
        "yeshwanthpur",
        &[
            "Yeshwanthpur Railway Station",
            "Govardhan Theatre Signal",
            "Orion Mall Junction",
            "RMC Yard",
        ],
    ),
];

const DEFAULT_SIGNAL_NAMES: &[&str] = &[
    "Major Junction Signal 1",
    "City Center Signal",
    "Hospital Route Signal",
    "Emergency Corridor Signal",
];

/// The named junctions listed for a pickup location, for display.
///
/// Uses the first area the pickup name contains, or a generic list. An empty
/// pickup has no route and therefore no signals.
pub fn signal_names(pickup: &str) -> &'static [&'static str] {
    if pickup.is_empty() {
        return &[];
    }
    let pickup = pickup.to_lowercase();
    NAMED_SIGNALS
        .iter()
        .find(|(area, _)| pickup.contains(area))
        .map(|(_, names)| *names)
        .unwrap_or(DEFAULT_SIGNAL_NAMES)
}

/// The display name of the 1-based signal `number`, or `Signal N` when the
/// list runs short.
pub fn signal_label(names: &[&'static str], number: usize) -> Cow<'static, str> {
    match number.checked_sub(1).and_then(|i| names.get(i)) {
        Some(name) => Cow::Borrowed(*name),
        None => Cow::Owned(format!("Signal {}", number)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::generate_route;

    #[test]
    fn signals_clear_ahead_of_the_vehicle() {
        assert!(signal_states(0.16)[0].cleared);
        assert!(!signal_states(0.14)[0].cleared);
        assert_eq!(signal_states(0.14)[0].light(), LightState::Red);
    }

    #[test]
    fn cleared_signals_stay_cleared() {
        let mut cleared = [false; 5];
        for i in 0..=100 {
            let states = signal_states(i as f64 / 100.0);
            for (was, now) in cleared.iter_mut().zip(states) {
                assert!(!*was || now.cleared);
                *was = now.cleared;
            }
        }
        assert!(cleared.iter().all(|c| *c));
    }

    #[test]
    fn restart_shows_all_red() {
        assert!(signal_states(0.0).iter().all(|s| !s.cleared));
    }

    #[test]
    fn proximity() {
        assert!(is_near_signal(0.19));
        assert!(is_near_signal(0.22));
        assert!(!is_near_signal(0.25));
        assert!(!is_near_signal(0.0));
        // Cleared state does not matter.
        assert!(is_near_signal(0.81));
    }

    #[test]
    fn no_slowdown_in_the_final_stretch() {
        let rules = SignalRules {
            proximity: 0.5,
            ..Default::default()
        };
        assert!(rules.is_near(0.97));
        assert!(!rules.is_near(0.98));
        assert!(!rules.is_near(0.99));
    }

    #[test]
    fn signals_are_placed_on_waypoints() {
        let route = generate_route(Coordinate::new(12.9716, 77.6197), Coordinate::new(12.985, 77.56));
        let signals = place_signals(&route);
        assert_eq!(signals.map(|s| s.number), [1, 2, 3, 4, 5]);
        assert_eq!(signals[0].coordinate, route.get(10).unwrap());
        assert_eq!(signals[2].coordinate, route.get(26).unwrap());
        assert_eq!(signals[4].coordinate, route.get(41).unwrap());
    }

    #[test]
    fn named_signals_follow_the_pickup_area() {
        assert_eq!(signal_names("MG Road Metro")[0], "Trinity Metro Station Signal");
        assert_eq!(signal_names("Somewhere else").len(), 4);
        assert!(signal_names("").is_empty());
    }

    #[test]
    fn short_name_lists_fall_back_to_numbers() {
        let names = signal_names("Koramangala");
        assert_eq!(names.len(), 4);
        let signals = place_signals(&generate_route(
            Coordinate::new(12.9352, 77.6245),
            Coordinate::new(12.9716, 77.5946),
        ));
        let labels: Vec<_> = signals
            .iter()
            .map(|s| signal_label(names, s.number))
            .collect();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], names[0]);
        assert_eq!(labels[3], names[3]);
        assert_eq!(labels[4], "Signal 5");
        assert_eq!(signal_label(&[], 0), "Signal 0");
    }
}

//! Resolution of free-text place names to coordinates.
//!
//! The gazetteer is an ordered list of lowercase keys. A name resolves to the
//! coordinate of the first key it contains, so the order of [GAZETTEER] is
//! part of its behaviour: "Chord Road Hospital, Rajajinagar" contains both
//! `rajajinagar` and `chord road hospital`, and resolves to the area because
//! the areas are listed first.

use crate::geo::Coordinate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The coordinate returned when no gazetteer key matches (the city centre).
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(12.9716, 77.5946);

/// Known places, in match order.
pub const GAZETTEER: &[(&str, Coordinate)] = &[
    ("vv puram", Coordinate::new(12.9395, 77.5831)),
    ("mg road", Coordinate::new(12.9716, 77.6197)),
    ("whitefield", Coordinate::new(12.9698, 77.7500)),
    ("jayanagar", Coordinate::new(12.9279, 77.5937)),
    ("koramangala", Coordinate::new(12.9352, 77.6245)),
    ("hebbal", Coordinate::new(13.0358, 77.5970)),
    ("yeshwanthpur", Coordinate::new(13.0284, 77.5385)),
    ("rajajinagar", Coordinate::new(12.9899, 77.5533)),
    ("chord road hospital", Coordinate::new(12.9850, 77.5600)),
    ("st. martha's hospital", Coordinate::new(12.9750, 77.6180)),
    ("columbia asia hospital", Coordinate::new(12.9780, 77.7550)),
    ("jayadeva institute", Coordinate::new(12.9150, 77.5980)),
    ("manipal hospital", Coordinate::new(12.9600, 77.6480)),
    ("aster cmi hospital", Coordinate::new(13.0450, 77.6050)),
    ("sapthagiri hospital", Coordinate::new(13.0250, 77.5250)),
    ("bgs global hospital", Coordinate::new(12.8900, 77.5000)),
    ("shankar netralaya", Coordinate::new(12.9710, 77.6380)),
    ("narayana health city", Coordinate::new(12.8600, 77.6800)),
];

static BY_KEY: Lazy<HashMap<&'static str, Coordinate>> =
    Lazy::new(|| GAZETTEER.iter().copied().collect());

/// Resolves a place name to a coordinate.
///
/// Matching is case-insensitive substring containment against each key in
/// [GAZETTEER] order. Falls back to [DEFAULT_COORDINATE].
pub fn resolve(name: &str) -> Coordinate {
    resolve_key(name)
        .map(|(_, coord)| coord)
        .unwrap_or(DEFAULT_COORDINATE)
}

/// Like [resolve], but also returns the matching key, or `None` if the
/// default would be used.
pub fn resolve_key(name: &str) -> Option<(&'static str, Coordinate)> {
    let name = name.to_lowercase();
    let found = GAZETTEER
        .iter()
        .find(|(key, _)| name.contains(key))
        .copied();
    if found.is_none() {
        log::debug!("no gazetteer match for {:?}, using the city centre", name);
    }
    found
}

/// Looks up a gazetteer key exactly, e.g. to centre a view on a selected area.
pub fn lookup_exact(key: &str) -> Option<Coordinate> {
    BY_KEY.get(key).copied()
}

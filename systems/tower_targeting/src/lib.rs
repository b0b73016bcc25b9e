#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects the nearest target within a tower's range.
//!
//! Selection is deterministic: candidates are scanned in the order they are
//! supplied and a later candidate only replaces the current best when it is
//! strictly closer, so equidistant candidates resolve to the first one seen.

use wild_defense_core::WorldPoint;

/// Potential target presented to the selector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate<K> {
    /// Caller-defined handle returned when the candidate is selected.
    pub key: K,
    /// Position of the candidate in world units.
    pub position: WorldPoint,
}

impl<K> Candidate<K> {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(key: K, position: WorldPoint) -> Self {
        Self { key, position }
    }
}

/// Candidate chosen by [`nearest_in_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection<K> {
    /// Handle of the selected candidate.
    pub key: K,
    /// Straight-line distance from the origin to the candidate.
    pub distance: f32,
}

/// Returns the candidate closest to `origin` whose distance is at most `range`.
pub fn nearest_in_range<K, I>(origin: WorldPoint, range: f32, candidates: I) -> Option<Selection<K>>
where
    I: IntoIterator<Item = Candidate<K>>,
{
    let mut best: Option<Selection<K>> = None;

    for candidate in candidates {
        let distance = origin.distance(candidate.position);
        if distance > range {
            continue;
        }

        let closer = best
            .as_ref()
            .map_or(true, |current| distance < current.distance);
        if closer {
            best = Some(Selection {
                key: candidate.key,
                distance,
            });
        }
    }

    best
}

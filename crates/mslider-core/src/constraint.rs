#![forbid(unsafe_code)]

//! Legal pixel ranges for each marker.
//!
//! Given the marker being moved, the other marker's displayed position and
//! the overlap policy, [`bounds_for`] yields `[lower, upper]` in track
//! coordinates. Raw gesture positions are always confined to this interval
//! before quantization.
//!
//! # Invariants
//!
//! 1. `lower <= upper` for every returned [`Bounds`]; a collapsed interval
//!    pins the marker at `lower`.
//! 2. With overlap disallowed, confining either marker keeps
//!    `position(Two) - position(One) >= effective_gap`.

use serde::{Deserialize, Serialize};

/// One of the two markers on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerId {
    One,
    Two,
}

/// How close the two markers may get.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlapPolicy {
    pub allow_overlap: bool,
    /// Pixel gap overriding the one-step default when > 0.
    pub min_overlap_distance: f64,
}

impl OverlapPolicy {
    #[must_use]
    pub const fn new(allow_overlap: bool, min_overlap_distance: f64) -> Self {
        Self {
            allow_overlap,
            min_overlap_distance,
        }
    }

    /// Minimum separation in pixels for a track with the given step length.
    #[must_use]
    pub fn effective_gap(&self, step_length: f64) -> f64 {
        if self.allow_overlap {
            0.0
        } else if self.min_overlap_distance > 0.0 {
            self.min_overlap_distance
        } else {
            step_length
        }
    }
}

/// Closed pixel interval a marker may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Build bounds, collapsing an inverted interval onto `lower`.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper: upper.max(lower),
        }
    }

    /// Clamp an unconfined position into the interval. NaN maps to `lower`.
    #[must_use]
    pub fn confine(&self, unconfined: f64) -> f64 {
        if unconfined.is_nan() {
            return self.lower;
        }
        unconfined.clamp(self.lower, self.upper)
    }
}

/// Legal interval for `marker`.
///
/// `other_position` is the other marker's displayed position, or `None` in
/// single-marker mode. Marker One without a partner may use the whole track.
#[must_use]
pub fn bounds_for(
    marker: MarkerId,
    other_position: Option<f64>,
    track_length: f64,
    policy: OverlapPolicy,
    step_length: f64,
) -> Bounds {
    let gap = policy.effective_gap(step_length);
    match (marker, other_position) {
        (MarkerId::One, Some(two)) => Bounds::new(0.0, (two - gap).min(track_length)),
        (MarkerId::One, None) => Bounds::new(0.0, track_length),
        (MarkerId::Two, Some(one)) => {
            Bounds::new((one + gap).clamp(0.0, track_length), track_length)
        }
        (MarkerId::Two, None) => Bounds::new(0.0, track_length),
    }
}

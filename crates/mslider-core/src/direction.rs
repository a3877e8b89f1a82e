#![forbid(unsafe_code)]

//! Horizontal layout direction.
//!
//! Right-to-left mirroring is applied exactly once, where gesture deltas and
//! track-tap locations enter the session. Everything downstream (constraints,
//! quantization, render state) works in left-to-right track coordinates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    /// Map a horizontal gesture delta into track coordinates.
    #[inline]
    #[must_use]
    pub fn apply(self, dx: f64) -> f64 {
        match self {
            Self::Ltr => dx,
            Self::Rtl => -dx,
        }
    }

    /// Map a tap location measured from the visual start of the track.
    #[inline]
    #[must_use]
    pub fn locate(self, x: f64, track_length: f64) -> f64 {
        match self {
            Self::Ltr => x,
            Self::Rtl => track_length - x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtl_flips_sign() {
        assert_eq!(LayoutDirection::Ltr.apply(12.0), 12.0);
        assert_eq!(LayoutDirection::Rtl.apply(12.0), -12.0);
    }

    #[test]
    fn rtl_mirrors_tap_location() {
        assert_eq!(LayoutDirection::Ltr.locate(30.0, 280.0), 30.0);
        assert_eq!(LayoutDirection::Rtl.locate(30.0, 280.0), 250.0);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&LayoutDirection::Rtl).unwrap();
        assert_eq!(json, "\"rtl\"");
    }
}

#![forbid(unsafe_code)]

//! Discrete index space and the pixel/value converter.
//!
//! A [`ValueSpace`] is the ordered list of legal values (either derived from
//! `(min, max, step)` or supplied explicitly) laid out evenly along a track:
//!
//! ```text
//! pixel(i)    = i * step_length
//! step_length = track_length / (len - 1)
//! ```
//!
//! Construction validates everything that could produce a degenerate space
//! (zero slots, non-finite bounds, zero-length track). Once built, every
//! conversion is total: out-of-range pixels and values are clamped to the
//! nearest end of the track.
//!
//! Quantization rounds the fractional index half-up, so two pixel positions
//! within half a step of the same slot resolve to the same value.

use serde::{Deserialize, Serialize};

use crate::error::SliderConfigError;

/// Upper bound on materialized slots.
pub const MAX_INDEX_COUNT: usize = 1_000_000;

/// Float noise tolerated when dividing the span by the step.
const SLOT_TOLERANCE: f64 = 1e-9;

/// `{min, max, step}` describing an evenly stepped index space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDefinition {
    min: f64,
    max: f64,
    step: f64,
}

impl RangeDefinition {
    /// Validate and build a range definition.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, SliderConfigError> {
        for (field, value) in [("min", min), ("max", max), ("step", step)] {
            if !value.is_finite() {
                return Err(SliderConfigError::NonFinite { field });
            }
        }
        if max <= min {
            return Err(SliderConfigError::InvalidRange { min, max });
        }
        if step <= 0.0 {
            return Err(SliderConfigError::InvalidStep { step });
        }
        let span = max - min;
        if step > span {
            return Err(SliderConfigError::StepExceedsRange { step, span });
        }
        let slots = (span / step + SLOT_TOLERANCE).floor();
        if slots >= MAX_INDEX_COUNT as f64 {
            return Err(SliderConfigError::TooManySlots {
                slots,
                limit: MAX_INDEX_COUNT,
            });
        }
        Ok(Self { min, max, step })
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of slots `N` between the first and last value (`len - 1`).
    ///
    /// When the span is not a multiple of the step the partial slot at the
    /// top is dropped, so the last value may be below `max`.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        ((self.max - self.min) / self.step + SLOT_TOLERANCE).floor() as usize
    }

    /// Materialize the `N + 1` discrete values.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        (0..=self.slot_count())
            .map(|i| normalize(self.min + self.step * i as f64))
            .collect()
    }
}

/// Discrete values laid out along a track of known pixel length.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpace {
    values: Vec<f64>,
    track_length: f64,
    step_length: f64,
}

impl ValueSpace {
    /// Build the space for a stepped range.
    pub fn new(range: &RangeDefinition, track_length: f64) -> Result<Self, SliderConfigError> {
        Self::build(range.values(), track_length)
    }

    /// Build the space from an explicit, strictly ascending list of values.
    pub fn from_options(options: Vec<f64>, track_length: f64) -> Result<Self, SliderConfigError> {
        if options.len() < 2 {
            return Err(SliderConfigError::TooFewOptions { len: options.len() });
        }
        if options.len() > MAX_INDEX_COUNT {
            return Err(SliderConfigError::TooManySlots {
                slots: options.len() as f64,
                limit: MAX_INDEX_COUNT,
            });
        }
        if options.iter().any(|v| !v.is_finite()) {
            return Err(SliderConfigError::NonFinite { field: "options" });
        }
        if let Some(index) = options.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(SliderConfigError::UnsortedOptions { index: index + 1 });
        }
        Self::build(options, track_length)
    }

    fn build(values: Vec<f64>, track_length: f64) -> Result<Self, SliderConfigError> {
        validate_track_length(track_length)?;
        let slots = values.len().saturating_sub(1);
        if slots == 0 {
            return Err(SliderConfigError::TooFewOptions { len: values.len() });
        }
        Ok(Self {
            step_length: track_length / slots as f64,
            values,
            track_length,
        })
    }

    /// Number of discrete values (`N + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a built space holds at least two values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub const fn track_length(&self) -> f64 {
        self.track_length
    }

    /// Pixel distance between adjacent slots.
    #[must_use]
    pub const fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Value at `index`, clamped to the last slot.
    #[must_use]
    pub fn value_at(&self, index: usize) -> f64 {
        self.values[index.min(self.last_index())]
    }

    /// Canonical pixel offset of `index`.
    #[must_use]
    pub fn index_position(&self, index: usize) -> f64 {
        let index = index.min(self.last_index());
        if index == self.last_index() {
            // Avoid drift at the far end: the last slot sits exactly on the track end.
            return self.track_length;
        }
        index as f64 * self.step_length
    }

    /// Index of the value nearest to `value`; ties resolve upward.
    #[must_use]
    pub fn index_of(&self, value: f64) -> usize {
        let upper = self.values.partition_point(|v| *v < value);
        if upper == 0 {
            return 0;
        }
        if upper >= self.values.len() {
            return self.last_index();
        }
        let below = value - self.values[upper - 1];
        let above = self.values[upper] - value;
        if above <= below { upper } else { upper - 1 }
    }

    /// Quantize a pixel offset to an index (round half-up, clamped).
    #[must_use]
    pub fn position_to_index(&self, pixel: f64) -> usize {
        if pixel.is_nan() {
            return 0;
        }
        let pixel = pixel.clamp(0.0, self.track_length);
        let raw = (pixel / self.step_length + 0.5).floor();
        (raw as usize).min(self.last_index())
    }

    /// Locate `value`'s nearest slot and return its pixel offset.
    #[must_use]
    pub fn value_to_position(&self, value: f64) -> f64 {
        self.index_position(self.index_of(value))
    }

    /// Inverse of [`value_to_position`](Self::value_to_position).
    #[must_use]
    pub fn position_to_value(&self, pixel: f64) -> f64 {
        self.value_at(self.position_to_index(pixel))
    }

    /// Snap a pixel offset to the canonical position of its slot.
    #[must_use]
    pub fn snap(&self, pixel: f64) -> f64 {
        self.index_position(self.position_to_index(pixel))
    }
}

pub(crate) fn validate_track_length(track_length: f64) -> Result<(), SliderConfigError> {
    if !track_length.is_finite() {
        return Err(SliderConfigError::NonFinite {
            field: "track_length",
        });
    }
    if track_length <= 0.0 {
        return Err(SliderConfigError::InvalidTrackLength {
            length: track_length,
        });
    }
    Ok(())
}

/// Strip accumulated float noise (`0.1 * 3 = 0.30000000000000004`).
fn normalize(value: f64) -> f64 {
    if value.abs() >= 1e6 {
        return value;
    }
    (value * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(min: f64, max: f64, step: f64, track: f64) -> ValueSpace {
        let range = RangeDefinition::new(min, max, step).unwrap();
        ValueSpace::new(&range, track).unwrap()
    }

    #[test]
    fn ten_slots_on_280_pixels() {
        let s = space(0.0, 10.0, 1.0, 280.0);
        assert_eq!(s.len(), 11);
        assert_eq!(s.step_length(), 28.0);
        assert_eq!(s.value_to_position(5.0), 140.0);
        assert_eq!(s.value_to_position(10.0), 280.0);
        assert_eq!(s.position_to_value(140.0), 5.0);
    }

    #[test]
    fn rounding_is_half_up() {
        let s = space(0.0, 10.0, 1.0, 280.0);
        assert_eq!(s.position_to_value(13.9), 0.0);
        assert_eq!(s.position_to_value(14.0), 1.0);
        assert_eq!(s.position_to_value(41.9), 1.0);
        assert_eq!(s.position_to_value(42.0), 2.0);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        let s = space(0.0, 10.0, 1.0, 280.0);
        assert_eq!(s.position_to_value(-50.0), 0.0);
        assert_eq!(s.position_to_value(9000.0), 10.0);
        assert_eq!(s.position_to_value(f64::NAN), 0.0);
        assert_eq!(s.value_to_position(-3.0), 0.0);
        assert_eq!(s.value_to_position(42.0), 280.0);
    }

    #[test]
    fn value_lookup_picks_nearest_slot() {
        let s = space(0.0, 10.0, 2.0, 100.0);
        assert_eq!(s.index_of(2.9), 1);
        assert_eq!(s.index_of(3.0), 2);
        assert_eq!(s.index_of(3.1), 2);
    }

    #[test]
    fn fractional_steps_are_normalized() {
        let range = RangeDefinition::new(0.0, 1.0, 0.1).unwrap();
        let values = range.values();
        assert_eq!(values.len(), 11);
        assert_eq!(values[3], 0.3);
        assert_eq!(values[10], 1.0);
    }

    #[test]
    fn partial_top_slot_is_dropped() {
        let range = RangeDefinition::new(0.0, 10.0, 3.0).unwrap();
        assert_eq!(range.slot_count(), 3);
        assert_eq!(range.values(), vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert_eq!(
            RangeDefinition::new(5.0, 5.0, 1.0),
            Err(SliderConfigError::InvalidRange { min: 5.0, max: 5.0 })
        );
        assert_eq!(
            RangeDefinition::new(0.0, 10.0, 0.0),
            Err(SliderConfigError::InvalidStep { step: 0.0 })
        );
        assert!(matches!(
            RangeDefinition::new(0.0, 1.0, 2.0),
            Err(SliderConfigError::StepExceedsRange { .. })
        ));
        assert!(matches!(
            RangeDefinition::new(0.0, f64::INFINITY, 1.0),
            Err(SliderConfigError::NonFinite { field: "max" })
        ));
        assert!(matches!(
            RangeDefinition::new(0.0, 1e12, 1.0),
            Err(SliderConfigError::TooManySlots { .. })
        ));
    }

    #[test]
    fn zero_track_is_rejected() {
        let range = RangeDefinition::new(0.0, 10.0, 1.0).unwrap();
        assert_eq!(
            ValueSpace::new(&range, 0.0),
            Err(SliderConfigError::InvalidTrackLength { length: 0.0 })
        );
    }

    #[test]
    fn explicit_options() {
        let s = ValueSpace::from_options(vec![1.0, 2.0, 5.0, 10.0, 20.0], 120.0).unwrap();
        assert_eq!(s.step_length(), 30.0);
        assert_eq!(s.value_to_position(10.0), 90.0);
        assert_eq!(s.position_to_value(100.0), 10.0);
        assert_eq!(s.index_of(7.0), 2);
        assert_eq!(s.index_of(7.5), 3);
    }

    #[test]
    fn options_must_ascend() {
        assert_eq!(
            ValueSpace::from_options(vec![1.0, 3.0, 3.0], 100.0),
            Err(SliderConfigError::UnsortedOptions { index: 2 })
        );
        assert_eq!(
            ValueSpace::from_options(vec![1.0], 100.0),
            Err(SliderConfigError::TooFewOptions { len: 1 })
        );
    }

    #[test]
    fn snap_lands_on_canonical_positions() {
        let s = space(0.0, 10.0, 1.0, 280.0);
        assert_eq!(s.snap(30.0), 28.0);
        assert_eq!(s.snap(275.0), 280.0);
    }
}

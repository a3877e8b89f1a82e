#![forbid(unsafe_code)]

//! Error types for slider configuration.
//!
//! Gesture handling never fails: out-of-order or disabled input becomes a
//! [`Noop`](crate::session::SliderEffect::Noop) effect and out-of-range
//! pixels are clamped. The only failure surface is a configuration that
//! would produce a degenerate index space (e.g. `max <= min`, `step <= 0`),
//! rejected here before any division happens.

use thiserror::Error;

/// A configuration that cannot describe a usable slider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderConfigError {
    /// A numeric option is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("max must be greater than min (min={min}, max={max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("step must be > 0 (got {step})")]
    InvalidStep { step: f64 },

    /// The step is wider than the range, leaving no slot between min and max.
    #[error("step {step} exceeds the range span {span}")]
    StepExceedsRange { step: f64, span: f64 },

    /// The index space would be materialized with more slots than allowed.
    #[error("range produces {slots} slots (limit {limit})")]
    TooManySlots { slots: f64, limit: usize },

    #[error("an options list needs at least two values (got {len})")]
    TooFewOptions { len: usize },

    /// Options must be strictly ascending; `index` is the first offender.
    #[error("options must be strictly ascending (violation at index {index})")]
    UnsortedOptions { index: usize },

    #[error("track length must be > 0 (got {length})")]
    InvalidTrackLength { length: f64 },

    #[error("min_overlap_distance must be >= 0 (got {distance})")]
    NegativeOverlapDistance { distance: f64 },

    #[error("min_overlap_distance {distance} does not fit on a track of length {track_length}")]
    OverlapDistanceExceedsTrack { distance: f64, track_length: f64 },

    #[error("slip_displacement must be >= 0 (got {threshold})")]
    NegativeSlipDisplacement { threshold: f64 },

    /// Only one or two markers are supported.
    #[error("values must hold one or two entries (got {count})")]
    InvalidValueCount { count: usize },
}

/// Errors that can occur when loading a [`SliderConfig`](crate::config::SliderConfig)
/// from disk or text.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid slider config: {0}")]
    Invalid(#[from] SliderConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = SliderConfigError::NonFinite { field: "step" };
        assert_eq!(err.to_string(), "step must be finite");

        let err = SliderConfigError::InvalidRange { min: 5.0, max: 5.0 };
        assert!(err.to_string().contains("min=5"));
    }

    #[test]
    fn load_error_wraps_config_error() {
        let err: ConfigLoadError = SliderConfigError::InvalidStep { step: 0.0 }.into();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
        assert!(err.to_string().starts_with("invalid slider config"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

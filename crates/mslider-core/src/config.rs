#![forbid(unsafe_code)]

//! Slider configuration as data.
//!
//! [`SliderConfig`] groups every recognized option into one serde-friendly
//! struct. Defaults match the stock slider: one marker at `0` on a
//! `[0, 10]` range with step `1`, a 280 px track and a 220 px slip threshold.
//!
//! # Loading (feature `config-files`)
//!
//! ```toml
//! values = [2.0, 8.0]
//! min = 0.0
//! max = 10.0
//! step = 1.0
//! track_length = 280.0
//! snapped = true
//! layout_direction = "rtl"
//! ```
//!
//! ```rust,ignore
//! let config = SliderConfig::from_toml_file("slider.toml")?;
//! let config = SliderConfig::from_json_str(json)?;
//! ```

#[cfg(feature = "config-files")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constraint::{MarkerId, OverlapPolicy};
use crate::direction::LayoutDirection;
use crate::error::SliderConfigError;
#[cfg(feature = "config-files")]
use crate::error::ConfigLoadError;
use crate::value_space::{RangeDefinition, ValueSpace, validate_track_length};

/// Default pixel length of the track.
pub const DEFAULT_TRACK_LENGTH: f64 = 280.0;

/// Default perpendicular drift (px) after which a move is ignored.
pub const DEFAULT_SLIP_DISPLACEMENT: f64 = 220.0;

/// Every recognized slider option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Explicit ascending values; replaces `min`/`max`/`step` when set.
    pub options: Option<Vec<f64>>,
    /// `[one]` or `[one, two]`; the length selects single or two-marker mode.
    pub values: Vec<f64>,
    #[serde(alias = "slider_length")]
    pub track_length: f64,
    pub allow_overlap: bool,
    /// Pixel gap overriding the one-step default when > 0.
    #[serde(alias = "min_marker_overlap_distance")]
    pub min_overlap_distance: f64,
    /// Displayed position follows the quantized value while dragging.
    pub snapped: bool,
    /// Tap-to-jump on the track (single-marker mode only).
    pub allow_track_touch: bool,
    pub enabled: bool,
    pub enabled_one: bool,
    pub enabled_two: bool,
    /// Perpendicular drift threshold in px; `0` disables slip cancellation.
    pub slip_displacement: f64,
    pub layout_direction: LayoutDirection,
    /// A tap on Marker One is reported as a toggle.
    pub toggle_one: bool,
    /// A tap on Marker Two is reported as a toggle.
    pub toggle_two: bool,
    pub marker_offset_x: f64,
    pub marker_offset_y: f64,
    pub value_prefix: String,
    pub value_suffix: String,
    /// Render the markers with distinct left/right variants.
    pub markers_separated: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
            step: 1.0,
            options: None,
            values: vec![0.0],
            track_length: DEFAULT_TRACK_LENGTH,
            allow_overlap: false,
            min_overlap_distance: 0.0,
            snapped: false,
            allow_track_touch: false,
            enabled: true,
            enabled_one: true,
            enabled_two: true,
            slip_displacement: DEFAULT_SLIP_DISPLACEMENT,
            layout_direction: LayoutDirection::Ltr,
            toggle_one: false,
            toggle_two: false,
            marker_offset_x: 0.0,
            marker_offset_y: 0.0,
            value_prefix: String::new(),
            value_suffix: String::new(),
            markers_separated: false,
        }
    }
}

impl SliderConfig {
    /// Two markers at `one` and `two` on the default range.
    #[must_use]
    pub fn range(one: f64, two: f64) -> Self {
        Self {
            values: vec![one, two],
            ..Self::default()
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check every option, failing on the first problem.
    pub fn validate(&self) -> Result<(), SliderConfigError> {
        let space = self.value_space()?;
        if self.values.is_empty() || self.values.len() > 2 {
            return Err(SliderConfigError::InvalidValueCount {
                count: self.values.len(),
            });
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(SliderConfigError::NonFinite { field: "values" });
        }
        for (field, value) in [
            ("min_overlap_distance", self.min_overlap_distance),
            ("slip_displacement", self.slip_displacement),
            ("marker_offset_x", self.marker_offset_x),
            ("marker_offset_y", self.marker_offset_y),
        ] {
            if !value.is_finite() {
                return Err(SliderConfigError::NonFinite { field });
            }
        }
        if self.min_overlap_distance < 0.0 {
            return Err(SliderConfigError::NegativeOverlapDistance {
                distance: self.min_overlap_distance,
            });
        }
        if self.values.len() == 2
            && !self.allow_overlap
            && self.min_overlap_distance > space.track_length()
        {
            return Err(SliderConfigError::OverlapDistanceExceedsTrack {
                distance: self.min_overlap_distance,
                track_length: space.track_length(),
            });
        }
        if self.slip_displacement < 0.0 {
            return Err(SliderConfigError::NegativeSlipDisplacement {
                threshold: self.slip_displacement,
            });
        }
        Ok(())
    }

    /// Build the discrete index space these options describe.
    pub fn value_space(&self) -> Result<ValueSpace, SliderConfigError> {
        validate_track_length(self.track_length)?;
        match &self.options {
            Some(options) => ValueSpace::from_options(options.clone(), self.track_length),
            None => {
                let range = RangeDefinition::new(self.min, self.max, self.step)?;
                ValueSpace::new(&range, self.track_length)
            }
        }
    }

    #[must_use]
    pub const fn overlap_policy(&self) -> OverlapPolicy {
        OverlapPolicy::new(self.allow_overlap, self.min_overlap_distance)
    }

    #[must_use]
    pub const fn toggles(&self, marker: MarkerId) -> bool {
        match marker {
            MarkerId::One => self.toggle_one,
            MarkerId::Two => self.toggle_two,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        assert_eq!(SliderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_stock_slider() {
        let config = SliderConfig::default();
        assert_eq!(config.values, vec![0.0]);
        assert_eq!(config.track_length, 280.0);
        assert_eq!(config.slip_displacement, 220.0);
        assert!(config.enabled && config.enabled_one && config.enabled_two);
        assert!(!config.allow_overlap && !config.snapped && !config.allow_track_touch);
    }

    #[test]
    fn validate_catches_bad_range() {
        let config = SliderConfig {
            min: 10.0,
            max: 0.0,
            ..SliderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SliderConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn validate_catches_value_count() {
        let config = SliderConfig {
            values: vec![1.0, 2.0, 3.0],
            ..SliderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SliderConfigError::InvalidValueCount { count: 3 })
        );
        let config = SliderConfig {
            values: Vec::new(),
            ..SliderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SliderConfigError::InvalidValueCount { count: 0 })
        );
    }

    #[test]
    fn validate_catches_negative_thresholds() {
        let mut config = SliderConfig::default();
        config.slip_displacement = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SliderConfigError::NegativeSlipDisplacement { .. })
        ));

        let mut config = SliderConfig::default();
        config.min_overlap_distance = -3.0;
        assert!(matches!(
            config.validate(),
            Err(SliderConfigError::NegativeOverlapDistance { .. })
        ));

        let mut config = SliderConfig::range(2.0, 8.0);
        config.min_overlap_distance = 500.0;
        assert!(matches!(
            config.validate(),
            Err(SliderConfigError::OverlapDistanceExceedsTrack { .. })
        ));
    }

    #[test]
    fn oversized_gap_is_ignored_with_one_marker() {
        let mut config = SliderConfig::default();
        config.min_overlap_distance = 500.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn options_override_range() {
        let config = SliderConfig {
            options: Some(vec![1.0, 2.0, 4.0, 8.0]),
            min: 100.0,
            max: 0.0,
            ..SliderConfig::default()
        };
        let space = config.value_space().unwrap();
        assert_eq!(space.len(), 4);
    }

    #[test]
    fn partial_json_preserves_defaults() {
        let config: SliderConfig =
            serde_json::from_str(r#"{"values": [2, 8], "snapped": true}"#).unwrap();
        assert_eq!(config.values, vec![2.0, 8.0]);
        assert!(config.snapped);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.track_length, 280.0);
    }

    #[test]
    fn slider_length_alias_is_accepted() {
        let config: SliderConfig = serde_json::from_str(r#"{"slider_length": 300}"#).unwrap();
        assert_eq!(config.track_length, 300.0);
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn toml_round_trip_is_validated() {
        let config = SliderConfig::from_toml_str("values = [2.0, 8.0]\nlayout_direction = \"rtl\"\n")
            .unwrap();
        assert_eq!(config.layout_direction, LayoutDirection::Rtl);
        let err = SliderConfig::from_toml_str("step = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }
}

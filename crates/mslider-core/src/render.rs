#![forbid(unsafe_code)]

//! Render-state derivation.
//!
//! The core does not draw anything. It derives plain data describing what a
//! host should draw (track segment lengths, per-marker state) and hands it
//! to a caller-supplied [`MarkerRenderer`].

use serde::{Deserialize, Serialize};

use crate::constraint::MarkerId;
use crate::marker::MarkerState;
use crate::session::SliderSession;

/// Which track segment carries the "selected" style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedSegment {
    /// Single-marker mode: from the track start up to Marker One.
    Leading,
    /// Two-marker mode: between the markers.
    Middle,
}

/// Lengths of the three track segments, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    pub track_length: f64,
    pub before: f64,
    pub middle: f64,
    /// Always 0 in single-marker mode.
    pub after: f64,
    pub selected: SelectedSegment,
}

/// Visual variant of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVariant {
    Shared,
    Left,
    Right,
}

/// Everything a renderer needs to draw one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRenderState {
    pub id: MarkerId,
    pub enabled: bool,
    pub pressed: bool,
    pub current_value: f64,
    /// `value_prefix + value + value_suffix`.
    pub label: String,
    pub position: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Drawn above the other marker.
    pub raised: bool,
    pub visible: bool,
    pub variant: MarkerVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderRenderState {
    pub track: TrackLayout,
    pub markers: Vec<MarkerRenderState>,
}

/// Capability the host supplies to draw the slider.
pub trait MarkerRenderer {
    fn render_track(&mut self, track: &TrackLayout);
    fn render_marker(&mut self, marker: &MarkerRenderState);
}

impl SliderRenderState {
    /// Draw the track, then each visible marker in order.
    pub fn render_with<R: MarkerRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render_track(&self.track);
        for marker in self.markers.iter().filter(|m| m.visible) {
            renderer.render_marker(marker);
        }
    }
}

impl SliderSession {
    /// Derive the current render state.
    #[must_use]
    pub fn render_state(&self) -> SliderRenderState {
        let track_length = self.space.track_length();
        let before = self.one.position();
        let (after, selected) = match &self.two {
            Some(two) => (track_length - two.position(), SelectedSegment::Middle),
            None => (0.0, SelectedSegment::Leading),
        };
        let track = TrackLayout {
            track_length,
            before,
            middle: (track_length - before - after).max(0.0),
            after,
            selected,
        };

        let separated = self.config.markers_separated;
        let mut markers = Vec::with_capacity(2);
        markers.push(self.marker_render_state(
            &self.one,
            before > track_length / 2.0,
            true,
            if separated {
                MarkerVariant::Left
            } else {
                MarkerVariant::Shared
            },
        ));
        if let Some(two) = &self.two {
            // Marker One parked at the far end covers Marker Two.
            let visible = before < track_length;
            markers.push(self.marker_render_state(
                two,
                false,
                visible,
                if separated {
                    MarkerVariant::Right
                } else {
                    MarkerVariant::Shared
                },
            ));
        }
        SliderRenderState { track, markers }
    }

    fn marker_render_state(
        &self,
        marker: &MarkerState,
        raised: bool,
        visible: bool,
        variant: MarkerVariant,
    ) -> MarkerRenderState {
        MarkerRenderState {
            id: marker.id(),
            enabled: self.is_marker_enabled(marker.id()),
            pressed: marker.is_pressed(),
            current_value: marker.value(),
            label: format!(
                "{}{}{}",
                self.config.value_prefix,
                marker.value(),
                self.config.value_suffix
            ),
            position: marker.position(),
            offset_x: self.config.marker_offset_x,
            offset_y: self.config.marker_offset_y,
            raised,
            visible,
            variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use crate::session::GestureTarget;

    #[derive(Default)]
    struct Capture {
        track: Option<TrackLayout>,
        labels: Vec<String>,
    }

    impl MarkerRenderer for Capture {
        fn render_track(&mut self, track: &TrackLayout) {
            self.track = Some(*track);
        }
        fn render_marker(&mut self, marker: &MarkerRenderState) {
            self.labels.push(marker.label.clone());
        }
    }

    #[test]
    fn two_marker_track_selects_middle() {
        let session = SliderSession::new(SliderConfig::range(2.0, 8.0)).unwrap();
        let state = session.render_state();
        assert_eq!(state.track.before, 56.0);
        assert_eq!(state.track.after, 56.0);
        assert_eq!(state.track.middle, 168.0);
        assert_eq!(state.track.selected, SelectedSegment::Middle);
        assert_eq!(state.markers.len(), 2);
    }

    #[test]
    fn single_marker_track_selects_leading() {
        let session = SliderSession::new(SliderConfig {
            values: vec![7.0],
            ..SliderConfig::default()
        })
        .unwrap();
        let state = session.render_state();
        assert_eq!(state.track.selected, SelectedSegment::Leading);
        assert_eq!(state.track.after, 0.0);
        assert_eq!(state.track.middle, 84.0);
        assert!(state.markers[0].raised);
    }

    #[test]
    fn labels_and_variants_follow_config() {
        let mut session = SliderSession::new(SliderConfig {
            value_prefix: "$".into(),
            value_suffix: "k".into(),
            markers_separated: true,
            ..SliderConfig::range(2.0, 8.0)
        })
        .unwrap();
        session.start(GestureTarget::Two);

        let state = session.render_state();
        assert_eq!(state.markers[0].label, "$2k");
        assert_eq!(state.markers[0].variant, MarkerVariant::Left);
        assert_eq!(state.markers[1].variant, MarkerVariant::Right);
        assert!(state.markers[1].pressed);
        assert!(!state.markers[0].pressed);

        let mut capture = Capture::default();
        state.render_with(&mut capture);
        assert_eq!(capture.labels, vec!["$2k", "$8k"]);
        assert!(capture.track.is_some());
    }

    #[test]
    fn marker_two_hidden_when_one_at_track_end() {
        let session = SliderSession::new(SliderConfig {
            allow_overlap: true,
            ..SliderConfig::range(10.0, 10.0)
        })
        .unwrap();
        let state = session.render_state();
        assert!(!state.markers[1].visible);

        let mut capture = Capture::default();
        state.render_with(&mut capture);
        assert_eq!(capture.labels.len(), 1);
    }
}

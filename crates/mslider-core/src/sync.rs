#![forbid(unsafe_code)]

//! External configuration sync.
//!
//! Hosts hand a fresh [`SliderConfig`] to [`SliderSession::sync`] whenever
//! their props change. Behavior flags (enabled, snapping, overlap policy,
//! slip threshold, direction, track touch, toggles) take effect at once.
//! Geometry (range, options, track length, marker values) is reconciled
//! only when no marker is mid-gesture: an update that arrives during a drag
//! is dropped, not queued.
//!
//! An applied resync re-lays the index space, re-places both markers and
//! reports their positions. It never emits start, change or finish
//! notifications.

use crate::config::SliderConfig;
use crate::error::SliderConfigError;
use crate::session::{SliderEffect, SliderNoopReason, SliderSession, SliderTransition, place_markers};
use crate::value_space::ValueSpace;

impl SliderSession {
    /// Reconcile the session with externally supplied options.
    ///
    /// Fails only if `next` is invalid, in which case nothing changes.
    pub fn sync(&mut self, next: &SliderConfig) -> Result<SliderTransition, SliderConfigError> {
        next.validate()?;
        let space = next.value_space()?;

        let geometry_changed = self.geometry_differs(next, &space);
        if geometry_changed && self.is_pressed() {
            self.adopt_behavior(next);
            tracing::debug!(
                values = ?next.values,
                "external update dropped while a marker is pressed"
            );
            return Ok(self.noop_untargeted(SliderNoopReason::GestureInProgress));
        }

        self.config = next.clone();
        self.apply_enabled_flags();
        if geometry_changed {
            let (one, two) = place_markers(next, &space);
            self.space = space;
            self.one = one;
            self.two = two;
            self.enforce_separation();
        } else if self.is_pressed() || !self.enforce_separation() {
            // A wider gap policy may still push idle markers apart.
            return Ok(self.noop_untargeted(SliderNoopReason::Unchanged));
        }

        let mut out = Vec::with_capacity(1);
        let readout = self.readout();
        self.dispatcher.resynced(&readout, &mut out);
        tracing::debug!(
            values = ?readout.values,
            positions = ?readout.positions,
            "slider resynced from external state"
        );
        Ok(self.transition(None, SliderEffect::Resynced, out))
    }

    /// Whether `next` would move a marker or re-lay the index space.
    fn geometry_differs(&self, next: &SliderConfig, space: &ValueSpace) -> bool {
        if space != &self.space || next.values.len() != self.readout().indices.len() {
            return true;
        }
        next.values
            .iter()
            .zip(self.markers())
            .any(|(value, marker)| space.index_of(*value) != marker.index())
    }

    /// Take behavior flags from `next` while keeping the current geometry.
    fn adopt_behavior(&mut self, next: &SliderConfig) {
        let geometry = self.config.clone();
        self.config = SliderConfig {
            min: geometry.min,
            max: geometry.max,
            step: geometry.step,
            options: geometry.options,
            values: geometry.values,
            track_length: geometry.track_length,
            ..next.clone()
        };
        self.apply_enabled_flags();
    }

    fn apply_enabled_flags(&mut self) {
        self.one.enabled = self.config.enabled_one;
        if let Some(two) = self.two.as_mut() {
            two.enabled = self.config.enabled_two;
        }
    }
}

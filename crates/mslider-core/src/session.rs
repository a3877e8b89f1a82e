#![forbid(unsafe_code)]

//! Drag session state machine.
//!
//! [`SliderSession`] owns the value space, both markers and the notification
//! dispatcher. Every mutation of the marker pair funnels through here (or
//! through [`sync`](SliderSession::sync) outside a gesture), and every
//! operation returns a [`SliderTransition`] describing what happened and
//! which notifications to deliver.
//!
//! # Gesture lifecycle
//!
//! ```text
//! Start ──> Move* ──> End | Terminate
//! ```
//!
//! Move deltas are cumulative since the gesture started. A move is resolved
//! in a fixed order: direction transform, slip check, confinement, then
//! quantization.
//!
//! # Invariants
//!
//! 1. With overlap disallowed, `position(Two) - position(One) >= gap` after
//!    every transition, including composite "between" drags.
//! 2. State is committed before any notification is handed out.
//! 3. End and Terminate always clear `pressed`, so no marker stays stuck.
//! 4. Disabled or out-of-order input yields a [`SliderEffect::Noop`] and
//!    leaves state untouched.

use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;
use crate::constraint::{Bounds, MarkerId, bounds_for};
use crate::error::SliderConfigError;
use crate::marker::{DragPhase, MarkerState};
use crate::notify::{Notification, NotificationDispatcher, Readout};
use crate::value_space::ValueSpace;

/// Tolerance for comparing pixel positions against bounds.
pub const POSITION_EPSILON: f64 = 1e-6;

/// What a gesture is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureTarget {
    One,
    Two,
    /// The track segment between two markers; drags both together.
    Between,
}

impl GestureTarget {
    #[must_use]
    pub const fn markers(self) -> &'static [MarkerId] {
        match self {
            Self::One => &[MarkerId::One],
            Self::Two => &[MarkerId::Two],
            Self::Between => &[MarkerId::One, MarkerId::Two],
        }
    }

    #[must_use]
    pub const fn single(self) -> Option<MarkerId> {
        match self {
            Self::One => Some(MarkerId::One),
            Self::Two => Some(MarkerId::Two),
            Self::Between => None,
        }
    }
}

impl From<MarkerId> for GestureTarget {
    fn from(id: MarkerId) -> Self {
        match id {
            MarkerId::One => Self::One,
            MarkerId::Two => Self::Two,
        }
    }
}

/// Cumulative gesture displacement since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureDelta {
    /// Along the track.
    pub dx: f64,
    /// Perpendicular to the track.
    pub dy: f64,
}

impl GestureDelta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub const fn horizontal(dx: f64) -> Self {
        Self { dx, dy: 0.0 }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// Host gesture lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GestureEvent {
    Start,
    Move(GestureDelta),
    End(GestureDelta),
    /// Forced release (system interruption). Cleans up like `End`.
    Terminate(GestureDelta),
}

/// Why an operation changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderNoopReason {
    SliderDisabled,
    MarkerDisabled,
    /// The target marker does not exist in single-marker mode.
    MarkerAbsent,
    NotPressed,
    AlreadyPressed,
    InvalidInput,
    TrackTouchUnavailable,
    /// External geometry update dropped because a marker is mid-gesture.
    GestureInProgress,
    Unchanged,
}

/// Effect of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SliderEffect {
    Started {
        markers: Vec<MarkerId>,
    },
    Moved {
        value_changed: bool,
        position_changed: bool,
    },
    /// Perpendicular drift reached the slip threshold; positions frozen.
    SlipCancelled {
        displacement: f64,
    },
    Committed {
        markers: Vec<MarkerId>,
        terminated: bool,
    },
    Toggled {
        marker: MarkerId,
    },
    TrackJumped {
        value: f64,
    },
    Resynced,
    Noop {
        reason: SliderNoopReason,
    },
}

/// One state-machine step with its notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderTransition {
    pub transition_id: u64,
    pub target: Option<GestureTarget>,
    pub effect: SliderEffect,
    pub notifications: Vec<Notification>,
}

impl SliderTransition {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, SliderEffect::Noop { .. })
    }
}

/// Runtime state of one slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSession {
    pub(crate) config: SliderConfig,
    pub(crate) space: ValueSpace,
    pub(crate) one: MarkerState,
    pub(crate) two: Option<MarkerState>,
    pub(crate) dispatcher: NotificationDispatcher,
    transition_counter: u64,
}

impl SliderSession {
    /// Validate `config` and place the markers at its initial values.
    pub fn new(config: SliderConfig) -> Result<Self, SliderConfigError> {
        config.validate()?;
        let space = config.value_space()?;
        let (one, two) = place_markers(&config, &space);
        let mut session = Self {
            config,
            space,
            one,
            two,
            dispatcher: NotificationDispatcher::default(),
            transition_counter: 0,
        };
        session.enforce_separation();
        session.dispatcher = NotificationDispatcher::new(&session.readout());
        tracing::debug!(
            values = ?session.values(),
            positions = ?session.positions(),
            "slider session created"
        );
        Ok(session)
    }

    #[must_use]
    pub const fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub const fn value_space(&self) -> &ValueSpace {
        &self.space
    }

    #[must_use]
    pub const fn is_two_marker(&self) -> bool {
        self.two.is_some()
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerState> {
        match id {
            MarkerId::One => Some(&self.one),
            MarkerId::Two => self.two.as_ref(),
        }
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut MarkerState> {
        match id {
            MarkerId::One => Some(&mut self.one),
            MarkerId::Two => self.two.as_mut(),
        }
    }

    /// `[one]` or `[one, two]`.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.markers().map(MarkerState::value).collect()
    }

    /// Displayed positions, same shape as [`values`](Self::values).
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        self.markers().map(MarkerState::position).collect()
    }

    /// Whether either marker is mid-gesture.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.markers().any(MarkerState::is_pressed)
    }

    /// Own flag AND the global enabled flag.
    #[must_use]
    pub fn is_marker_enabled(&self, id: MarkerId) -> bool {
        self.config.enabled && self.marker(id).is_some_and(MarkerState::is_enabled)
    }

    /// Minimum pixel separation currently enforced between the markers.
    #[must_use]
    pub fn effective_gap(&self) -> f64 {
        self.config
            .overlap_policy()
            .effective_gap(self.space.step_length())
    }

    /// Legal interval for `id` given the other marker's displayed position.
    #[must_use]
    pub fn bounds(&self, id: MarkerId) -> Bounds {
        let other = match id {
            MarkerId::One => self.two.as_ref().map(MarkerState::position),
            MarkerId::Two => Some(self.one.position),
        };
        bounds_for(
            id,
            other,
            self.space.track_length(),
            self.config.overlap_policy(),
            self.space.step_length(),
        )
    }

    pub(crate) fn markers(&self) -> impl Iterator<Item = &MarkerState> {
        std::iter::once(&self.one).chain(self.two.as_ref())
    }

    pub(crate) fn readout(&self) -> Readout {
        Readout {
            indices: self.markers().map(MarkerState::index).collect(),
            values: self.values(),
            positions: self.positions(),
        }
    }

    /// Apply one host gesture event to `target`.
    pub fn apply(&mut self, target: GestureTarget, event: GestureEvent) -> SliderTransition {
        match event {
            GestureEvent::Start => self.start(target),
            GestureEvent::Move(delta) => self.move_by(target, delta),
            GestureEvent::End(delta) => self.finish_gesture(target, delta, false),
            GestureEvent::Terminate(delta) => self.finish_gesture(target, delta, true),
        }
    }

    /// Gesture start: press every enabled marker of `target`.
    pub fn start(&mut self, target: GestureTarget) -> SliderTransition {
        if let Some(reason) = self.check_target(target) {
            return self.noop(target, reason);
        }
        if !self.config.enabled {
            return self.noop(target, SliderNoopReason::SliderDisabled);
        }

        let mut pressed = Vec::with_capacity(2);
        let mut blocked = SliderNoopReason::MarkerDisabled;
        for &id in target.markers() {
            let enabled = self.is_marker_enabled(id);
            let Some(marker) = self.marker_mut(id) else {
                continue;
            };
            if !enabled {
                continue;
            }
            if marker.is_pressed() {
                blocked = SliderNoopReason::AlreadyPressed;
                continue;
            }
            marker.phase = DragPhase::Pressed;
            marker.last_committed = marker.position;
            pressed.push(id);
        }
        if pressed.is_empty() {
            return self.noop(target, blocked);
        }

        let mut out = Vec::with_capacity(1);
        self.dispatcher.start(&mut out);
        tracing::debug!(?target, markers = ?pressed, "gesture started");
        self.transition(Some(target), SliderEffect::Started { markers: pressed }, out)
    }

    /// Gesture move with the cumulative delta since start.
    pub fn move_by(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderTransition {
        if let Some(reason) = self.check_target(target) {
            return self.noop(target, reason);
        }
        let pressed = self.pressed_markers(target);
        if pressed.is_empty() {
            return self.noop(target, SliderNoopReason::NotPressed);
        }
        if !delta.is_finite() {
            return self.noop(target, SliderNoopReason::InvalidInput);
        }
        let movable: Vec<MarkerId> = pressed
            .into_iter()
            .filter(|id| self.is_marker_enabled(*id))
            .collect();
        if movable.is_empty() {
            return self.noop(target, SliderNoopReason::MarkerDisabled);
        }

        // Slip is judged once per event, so a composite drag freezes both markers together.
        let threshold = self.config.slip_displacement;
        if threshold > 0.0 && delta.dy.abs() >= threshold {
            tracing::trace!(?target, dy = delta.dy, threshold, "move slip-cancelled");
            return self.transition(
                Some(target),
                SliderEffect::SlipCancelled {
                    displacement: delta.dy,
                },
                Vec::new(),
            );
        }

        let dx = self.config.layout_direction.apply(delta.dx);
        if movable.len() == 2 {
            self.move_pair(dx);
        } else {
            for id in movable {
                self.move_marker(id, dx);
            }
        }

        let mut out = Vec::with_capacity(2);
        let (value_changed, position_changed) = self.dispatcher.moved(&self.readout(), &mut out);
        self.transition(
            Some(target),
            SliderEffect::Moved {
                value_changed,
                position_changed,
            },
            out,
        )
    }

    /// Gesture end.
    pub fn end(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderTransition {
        self.finish_gesture(target, delta, false)
    }

    /// Forced release; never treated as a tap.
    pub fn terminate(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderTransition {
        self.finish_gesture(target, delta, true)
    }

    fn finish_gesture(
        &mut self,
        target: GestureTarget,
        delta: GestureDelta,
        terminated: bool,
    ) -> SliderTransition {
        if let Some(reason) = self.check_target(target) {
            return self.noop(target, reason);
        }
        let pressed = self.pressed_markers(target);
        if pressed.is_empty() {
            return self.noop(target, SliderNoopReason::NotPressed);
        }

        for &id in &pressed {
            if let Some(marker) = self.marker_mut(id) {
                marker.release();
            }
        }

        let mut out = Vec::with_capacity(1);
        if let Some(id) = target.single()
            && !terminated
            && delta.is_zero()
            && self.config.toggles(id)
        {
            self.dispatcher.toggle(id, &mut out);
            tracing::debug!(marker = ?id, "marker tapped, toggle fired");
            return self.transition(Some(target), SliderEffect::Toggled { marker: id }, out);
        }

        self.dispatcher.finish(&self.readout(), &mut out);
        tracing::debug!(
            ?target,
            terminated,
            values = ?self.values(),
            "gesture committed"
        );
        self.transition(
            Some(target),
            SliderEffect::Committed {
                markers: pressed,
                terminated,
            },
            out,
        )
    }

    /// Tap on the bare track at `x` px from its visual start.
    ///
    /// Only available in single-marker mode with `allow_track_touch`. Marker
    /// One jumps to the snapped slot under the tap.
    pub fn tap_track(&mut self, x: f64) -> SliderTransition {
        let track = self.space.track_length();
        let reason = if self.is_two_marker() || !self.config.allow_track_touch {
            Some(SliderNoopReason::TrackTouchUnavailable)
        } else if !self.is_marker_enabled(MarkerId::One) {
            Some(SliderNoopReason::SliderDisabled)
        } else if self.is_pressed() {
            Some(SliderNoopReason::GestureInProgress)
        } else if !x.is_finite() {
            Some(SliderNoopReason::InvalidInput)
        } else {
            None
        };
        if let Some(reason) = reason {
            return self.noop_untargeted(reason);
        }

        let location = self.config.layout_direction.locate(x, track);
        let bounds = self.bounds(MarkerId::One);
        let index = self.quantize_within(bounds.confine(location), bounds);
        if index == self.one.index {
            return self.noop_untargeted(SliderNoopReason::Unchanged);
        }

        let position = self.space.index_position(index);
        self.one.index = index;
        self.one.value = self.space.value_at(index);
        self.one.position = position;
        self.one.last_committed = position;

        let mut out = Vec::with_capacity(3);
        let readout = self.readout();
        self.dispatcher.moved(&readout, &mut out);
        self.dispatcher.finish(&readout, &mut out);
        tracing::debug!(x, value = self.one.value, "track tapped");
        let value = self.one.value;
        self.transition(None, SliderEffect::TrackJumped { value }, out)
    }

    fn move_marker(&mut self, id: MarkerId, dx: f64) {
        let bounds = self.bounds(id);
        let snapped_display = self.config.snapped;
        let Some(origin) = self.marker(id).map(MarkerState::last_committed_position) else {
            return;
        };
        let unconfined = origin + dx;
        let confined = bounds.confine(unconfined);
        let (index, position) = if snapped_display {
            let index = self.quantize_within(confined, bounds);
            (index, self.space.index_position(index))
        } else {
            (self.space.position_to_index(confined), confined)
        };
        let value = self.space.value_at(index);

        if let Some(marker) = self.marker_mut(id) {
            marker.index = index;
            marker.value = value;
            marker.position = position;
            marker.phase = DragPhase::Dragging;
        }
        tracing::trace!(marker = ?id, unconfined, confined, index, position, "marker moved");
    }

    /// Composite drag: translate both markers by the same shift, limited so
    /// neither leaves the track.
    ///
    /// Marker Two's raw target is placed first so Marker One is confined
    /// against where its partner is going, not where it was.
    fn move_pair(&mut self, dx: f64) {
        let track = self.space.track_length();
        let Some(two_origin) = self.two.as_ref().map(MarkerState::last_committed_position) else {
            self.move_marker(MarkerId::One, dx);
            return;
        };
        let shift = dx.max(-self.one.last_committed).min(track - two_origin);
        if let Some(two) = self.two.as_mut() {
            two.position = (two_origin + shift).clamp(0.0, track);
        }
        self.move_marker(MarkerId::One, shift);
        self.move_marker(MarkerId::Two, shift);
    }

    /// Nearest slot to `confined`, stepped back inside `bounds` if rounding
    /// pushed it out. Only used where the marker is drawn on its slot.
    pub(crate) fn quantize_within(&self, confined: f64, bounds: Bounds) -> usize {
        let space = &self.space;
        let mut index = space.position_to_index(confined);
        while index > 0 && space.index_position(index) > bounds.upper + POSITION_EPSILON {
            index -= 1;
        }
        while index < space.last_index()
            && space.index_position(index) < bounds.lower - POSITION_EPSILON
        {
            index += 1;
        }
        index
    }

    /// Restore the separation invariant after placing markers from external
    /// values: push Marker Two up, then pull Marker One down.
    pub(crate) fn enforce_separation(&mut self) -> bool {
        let gap = self.effective_gap();
        let last = self.space.last_index();
        let Some(two) = self.two.as_mut() else {
            return false;
        };
        let one = &mut self.one;
        let mut adjusted = false;
        while two.position - one.position < gap - POSITION_EPSILON {
            if two.index < last {
                two.index += 1;
            } else if one.index > 0 {
                one.index -= 1;
            } else {
                break;
            }
            for marker in [&mut *one, &mut *two] {
                marker.value = self.space.value_at(marker.index);
                marker.position = self.space.index_position(marker.index);
                marker.last_committed = marker.position;
            }
            adjusted = true;
        }
        if adjusted {
            tracing::warn!(
                one = one.value,
                two = two.value,
                gap,
                "marker values adjusted to keep minimum separation"
            );
        }
        adjusted
    }

    fn check_target(&self, target: GestureTarget) -> Option<SliderNoopReason> {
        let needs_two = !matches!(target, GestureTarget::One);
        (needs_two && self.two.is_none()).then_some(SliderNoopReason::MarkerAbsent)
    }

    fn pressed_markers(&self, target: GestureTarget) -> Vec<MarkerId> {
        target
            .markers()
            .iter()
            .copied()
            .filter(|id| self.marker(*id).is_some_and(MarkerState::is_pressed))
            .collect()
    }

    fn noop(&mut self, target: GestureTarget, reason: SliderNoopReason) -> SliderTransition {
        tracing::trace!(?target, ?reason, "gesture ignored");
        self.transition(Some(target), SliderEffect::Noop { reason }, Vec::new())
    }

    pub(crate) fn noop_untargeted(&mut self, reason: SliderNoopReason) -> SliderTransition {
        self.transition(None, SliderEffect::Noop { reason }, Vec::new())
    }

    pub(crate) fn transition(
        &mut self,
        target: Option<GestureTarget>,
        effect: SliderEffect,
        notifications: Vec<Notification>,
    ) -> SliderTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        SliderTransition {
            transition_id: self.transition_counter,
            target,
            effect,
            notifications,
        }
    }
}

/// Build settled markers from the configured values.
pub(crate) fn place_markers(
    config: &SliderConfig,
    space: &ValueSpace,
) -> (MarkerState, Option<MarkerState>) {
    let settle = |id: MarkerId, value: f64| {
        let index = space.index_of(value);
        MarkerState::settled(
            id,
            index,
            space.value_at(index),
            space.index_position(index),
            match id {
                MarkerId::One => config.enabled_one,
                MarkerId::Two => config.enabled_two,
            },
        )
    };
    let first = config.values.first().copied().unwrap_or(config.min);
    let one = settle(MarkerId::One, first);
    let two = config
        .values
        .get(1)
        .map(|value| settle(MarkerId::Two, *value));
    (one, two)
}

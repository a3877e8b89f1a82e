#![forbid(unsafe_code)]

//! Per-marker state.

use serde::{Deserialize, Serialize};

use crate::constraint::MarkerId;

/// Lifecycle of one marker's gesture.
///
/// ```text
/// Idle -> Pressed -> Dragging -> Idle
///            \-----------------> Idle (release without movement)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

impl DragPhase {
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// One marker bound to a slot of the value space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerState {
    pub(crate) id: MarkerId,
    pub(crate) index: usize,
    pub(crate) value: f64,
    /// Displayed position; raw or snapped depending on the snap policy.
    pub(crate) position: f64,
    /// Drag origin: position at the last gesture start/end.
    pub(crate) last_committed: f64,
    pub(crate) phase: DragPhase,
    pub(crate) enabled: bool,
}

impl MarkerState {
    pub(crate) fn settled(id: MarkerId, index: usize, value: f64, position: f64, enabled: bool) -> Self {
        Self {
            id,
            index,
            value,
            position,
            last_committed: position,
            phase: DragPhase::Idle,
            enabled,
        }
    }

    #[must_use]
    pub const fn id(&self) -> MarkerId {
        self.id
    }

    /// Slot index of the committed value.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub const fn last_committed_position(&self) -> f64 {
        self.last_committed
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.phase.is_pressed()
    }

    /// The marker's own enabled flag (the session's global flag is separate).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Commit the displayed position as the next drag origin and release.
    pub(crate) fn release(&mut self) {
        self.last_committed = self.position;
        self.phase = DragPhase::Idle;
    }
}

#![forbid(unsafe_code)]

//! Notification model and dispatch.
//!
//! The session never calls user code directly. Each operation commits its
//! state change first and then returns the [`Notification`]s it produced;
//! [`deliver`] hands them to a [`SliderObserver`] with every callback
//! isolated by `catch_unwind`, so a panicking consumer cannot leave a marker
//! mid-gesture or stop later callbacks from running.
//!
//! # Granularity
//!
//! - `ValuesChangeStart`: once per gesture start.
//! - `ValuesChange`: only when a quantized value differs from the last one
//!   emitted, not on every pixel of movement.
//! - `MarkersPosition`: whenever a displayed position changed, and on every
//!   resync. Independent of value de-duplication.
//! - `ValuesChangeFinish`: once per gesture end with the settled values.
//! - `Toggle`: a tap without movement on a marker with a toggle handler;
//!   replaces `ValuesChangeFinish` for that gesture.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};

use crate::constraint::MarkerId;

/// One observable event produced by a session operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    ValuesChangeStart,
    /// `[one]` in single-marker mode, `[one, two]` otherwise.
    ValuesChange(Vec<f64>),
    ValuesChangeFinish(Vec<f64>),
    /// Displayed positions, same shape as the values payload.
    MarkersPosition(Vec<f64>),
    Toggle(MarkerId),
}

impl Notification {
    /// Stable name used in logs and traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ValuesChangeStart => "values_change_start",
            Self::ValuesChange(_) => "values_change",
            Self::ValuesChangeFinish(_) => "values_change_finish",
            Self::MarkersPosition(_) => "markers_position",
            Self::Toggle(_) => "toggle",
        }
    }
}

/// Consumer of slider notifications. Every method defaults to a no-op.
pub trait SliderObserver {
    fn on_values_change_start(&mut self) {}
    fn on_values_change(&mut self, _values: &[f64]) {}
    fn on_values_change_finish(&mut self, _values: &[f64]) {}
    fn on_markers_position(&mut self, _positions: &[f64]) {}
    fn on_toggle(&mut self, _marker: MarkerId) {}
}

/// Snapshot of both markers used to shape payloads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Readout {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub positions: Vec<f64>,
}

/// Decides which notifications an operation emits.
///
/// Tracks the last emitted indices and positions so that repeated moves
/// within one slot do not re-fire `ValuesChange`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationDispatcher {
    emitted_indices: Vec<usize>,
    emitted_positions: Vec<f64>,
}

impl NotificationDispatcher {
    /// Start from the session's initial readout (nothing is emitted for it).
    #[must_use]
    pub fn new(initial: &Readout) -> Self {
        Self {
            emitted_indices: initial.indices.clone(),
            emitted_positions: initial.positions.clone(),
        }
    }

    pub fn start(&mut self, out: &mut Vec<Notification>) {
        out.push(Notification::ValuesChangeStart);
    }

    /// Emit `ValuesChange` and/or `MarkersPosition` for a move.
    ///
    /// Returns `(value_changed, position_changed)`.
    pub fn moved(&mut self, readout: &Readout, out: &mut Vec<Notification>) -> (bool, bool) {
        let value_changed = readout.indices != self.emitted_indices;
        if value_changed {
            self.emitted_indices = readout.indices.clone();
            out.push(Notification::ValuesChange(readout.values.clone()));
        }
        let position_changed = readout.positions != self.emitted_positions;
        if position_changed || value_changed {
            self.emitted_positions = readout.positions.clone();
            out.push(Notification::MarkersPosition(readout.positions.clone()));
        }
        (value_changed, position_changed)
    }

    pub fn finish(&mut self, readout: &Readout, out: &mut Vec<Notification>) {
        self.emitted_indices = readout.indices.clone();
        out.push(Notification::ValuesChangeFinish(readout.values.clone()));
    }

    pub fn toggle(&mut self, marker: MarkerId, out: &mut Vec<Notification>) {
        out.push(Notification::Toggle(marker));
    }

    /// External resync: report positions, silently adopt the new values.
    pub fn resynced(&mut self, readout: &Readout, out: &mut Vec<Notification>) {
        self.emitted_indices = readout.indices.clone();
        self.emitted_positions = readout.positions.clone();
        out.push(Notification::MarkersPosition(readout.positions.clone()));
    }
}

/// Outcome of delivering a batch of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub delivered: usize,
    pub panicked: usize,
}

impl DispatchReport {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.panicked == 0
    }
}

/// Deliver notifications in order, isolating each callback.
pub fn deliver<O>(notifications: &[Notification], observer: &mut O) -> DispatchReport
where
    O: SliderObserver + ?Sized,
{
    let mut report = DispatchReport::default();
    for notification in notifications {
        let result = catch_unwind(AssertUnwindSafe(|| match notification {
            Notification::ValuesChangeStart => observer.on_values_change_start(),
            Notification::ValuesChange(values) => observer.on_values_change(values),
            Notification::ValuesChangeFinish(values) => observer.on_values_change_finish(values),
            Notification::MarkersPosition(positions) => observer.on_markers_position(positions),
            Notification::Toggle(marker) => observer.on_toggle(*marker),
        }));
        match result {
            Ok(()) => report.delivered += 1,
            Err(_) => {
                report.panicked += 1;
                tracing::error!(kind = notification.kind(), "slider callback panicked");
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout(indices: &[usize], positions: &[f64]) -> Readout {
        Readout {
            indices: indices.to_vec(),
            values: indices.iter().map(|i| *i as f64).collect(),
            positions: positions.to_vec(),
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<&'static str>,
    }

    impl SliderObserver for Recorder {
        fn on_values_change_start(&mut self) {
            self.seen.push("start");
        }
        fn on_values_change(&mut self, _values: &[f64]) {
            panic!("consumer bug");
        }
        fn on_values_change_finish(&mut self, _values: &[f64]) {
            self.seen.push("finish");
        }
    }

    #[test]
    fn same_slot_does_not_refire_change() {
        let mut dispatcher = NotificationDispatcher::new(&readout(&[2], &[56.0]));
        let mut out = Vec::new();

        let (value, position) = dispatcher.moved(&readout(&[2], &[60.0]), &mut out);
        assert!(!value);
        assert!(position);
        assert_eq!(out, vec![Notification::MarkersPosition(vec![60.0])]);

        out.clear();
        dispatcher.moved(&readout(&[3], &[80.0]), &mut out);
        assert_eq!(
            out,
            vec![
                Notification::ValuesChange(vec![3.0]),
                Notification::MarkersPosition(vec![80.0]),
            ]
        );

        out.clear();
        assert_eq!(dispatcher.moved(&readout(&[3], &[80.0]), &mut out), (false, false));
        assert!(out.is_empty());
    }

    #[test]
    fn resync_adopts_values_without_change() {
        let mut dispatcher = NotificationDispatcher::new(&readout(&[1, 5], &[28.0, 140.0]));
        let mut out = Vec::new();
        dispatcher.resynced(&readout(&[2, 6], &[56.0, 168.0]), &mut out);
        assert_eq!(out, vec![Notification::MarkersPosition(vec![56.0, 168.0])]);

        out.clear();
        dispatcher.moved(&readout(&[2, 6], &[56.0, 168.0]), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn panicking_callback_is_isolated() {
        let mut recorder = Recorder::default();
        let report = deliver(
            &[
                Notification::ValuesChangeStart,
                Notification::ValuesChange(vec![1.0]),
                Notification::ValuesChangeFinish(vec![1.0]),
            ],
            &mut recorder,
        );
        assert_eq!(report, DispatchReport { delivered: 2, panicked: 1 });
        assert!(!report.is_clean());
        assert_eq!(recorder.seen, vec!["start", "finish"]);
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Notification::Toggle(MarkerId::Two)).unwrap();
        assert_eq!(json, r#"{"kind":"toggle","payload":"two"}"#);
        let json = serde_json::to_string(&Notification::ValuesChangeStart).unwrap();
        assert_eq!(json, r#"{"kind":"values_change_start"}"#);
    }
}

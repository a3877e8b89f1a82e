#![forbid(unsafe_code)]

//! Closure-based observer.

use std::fmt;

use mslider_core::{MarkerId, SliderObserver};

type UnitFn = Box<dyn FnMut()>;
type SliceFn = Box<dyn FnMut(&[f64])>;

/// Optional callbacks for every slider notification.
///
/// Registering a toggle callback for a marker is what turns a tap on that
/// marker into a toggle instead of a finish.
#[derive(Default)]
pub struct SliderCallbacks {
    values_change_start: Option<UnitFn>,
    values_change: Option<SliceFn>,
    values_change_finish: Option<SliceFn>,
    markers_position: Option<SliceFn>,
    toggle_one: Option<UnitFn>,
    toggle_two: Option<UnitFn>,
}

impl SliderCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_values_change_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.values_change_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_values_change(mut self, f: impl FnMut(&[f64]) + 'static) -> Self {
        self.values_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_values_change_finish(mut self, f: impl FnMut(&[f64]) + 'static) -> Self {
        self.values_change_finish = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_markers_position(mut self, f: impl FnMut(&[f64]) + 'static) -> Self {
        self.markers_position = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_toggle_one(mut self, f: impl FnMut() + 'static) -> Self {
        self.toggle_one = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_toggle_two(mut self, f: impl FnMut() + 'static) -> Self {
        self.toggle_two = Some(Box::new(f));
        self
    }

    /// Whether a toggle callback is registered for `marker`.
    #[must_use]
    pub const fn has_toggle(&self, marker: MarkerId) -> bool {
        match marker {
            MarkerId::One => self.toggle_one.is_some(),
            MarkerId::Two => self.toggle_two.is_some(),
        }
    }
}

impl SliderObserver for SliderCallbacks {
    fn on_values_change_start(&mut self) {
        if let Some(f) = self.values_change_start.as_mut() {
            f();
        }
    }

    fn on_values_change(&mut self, values: &[f64]) {
        if let Some(f) = self.values_change.as_mut() {
            f(values);
        }
    }

    fn on_values_change_finish(&mut self, values: &[f64]) {
        if let Some(f) = self.values_change_finish.as_mut() {
            f(values);
        }
    }

    fn on_markers_position(&mut self, positions: &[f64]) {
        if let Some(f) = self.markers_position.as_mut() {
            f(positions);
        }
    }

    fn on_toggle(&mut self, marker: MarkerId) {
        let slot = match marker {
            MarkerId::One => self.toggle_one.as_mut(),
            MarkerId::Two => self.toggle_two.as_mut(),
        };
        if let Some(f) = slot {
            f();
        }
    }
}

impl fmt::Debug for SliderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderCallbacks")
            .field("values_change_start", &self.values_change_start.is_some())
            .field("values_change", &self.values_change.is_some())
            .field("values_change_finish", &self.values_change_finish.is_some())
            .field("markers_position", &self.markers_position.is_some())
            .field("toggle_one", &self.toggle_one.is_some())
            .field("toggle_two", &self.toggle_two.is_some())
            .finish()
    }
}

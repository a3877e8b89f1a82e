#![forbid(unsafe_code)]

//! Range slider with one or two draggable markers.
//!
//! This crate is the callback-facing surface over `mslider-core`. It wires a
//! [`SliderSession`] to a set of closures and re-exports the types a host
//! needs day to day.
//!
//! ```
//! use mslider::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let finished = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&finished);
//! let mut slider = MultiSlider::new(
//!     SliderConfig::range(2.0, 8.0),
//!     SliderCallbacks::new().on_values_change_finish(move |v| sink.borrow_mut().push(v.to_vec())),
//! )?;
//!
//! slider.start(GestureTarget::Two);
//! slider.move_by(GestureTarget::Two, GestureDelta::horizontal(28.0));
//! slider.end(GestureTarget::Two, GestureDelta::horizontal(28.0));
//! assert_eq!(*finished.borrow(), vec![vec![2.0, 9.0]]);
//! # Ok::<(), mslider::Error>(())
//! ```

pub mod callbacks;
pub mod controller;

pub use callbacks::SliderCallbacks;
pub use controller::{MultiSlider, SliderOutcome};

// --- Core re-exports -------------------------------------------------------

pub use mslider_core::{
    Bounds, ConfigLoadError, DispatchReport, GestureDelta, GestureEvent, GestureTarget,
    LayoutDirection, MarkerId, MarkerRenderState, MarkerRenderer, MarkerVariant, Notification,
    SelectedSegment, SliderConfig, SliderConfigError, SliderEffect, SliderNoopReason,
    SliderObserver, SliderRenderState, SliderSession, SliderTransition, TrackLayout, ValueSpace,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for slider hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] SliderConfigError),
    #[error(transparent)]
    Load(#[from] ConfigLoadError),
}

/// Standard result type for mslider APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Common imports.
pub mod prelude {
    pub use crate::{
        GestureDelta, GestureEvent, GestureTarget, LayoutDirection, MarkerId, MultiSlider,
        SliderCallbacks, SliderConfig, SliderOutcome,
    };
}

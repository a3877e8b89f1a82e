#![forbid(unsafe_code)]

//! Core state machine for one- and two-marker range sliders.
//!
//! The crate reconciles three coordinate systems that a slider host keeps
//! juggling: raw gesture displacement in pixels, confined marker positions
//! along the track, and quantized values from a discrete index space.
//!
//! # Shape
//!
//! - [`ValueSpace`] maps indices to values and pixel offsets.
//! - [`bounds_for`] derives the legal interval for each marker.
//! - [`SliderSession`] owns both markers and consumes gesture events,
//!   returning a [`SliderTransition`] per event.
//! - [`deliver`] hands a transition's [`Notification`]s to a
//!   [`SliderObserver`], isolating each callback.
//! - [`SliderSession::sync`] reconciles externally supplied options.
//! - [`SliderSession::render_state`] derives what a host should draw.
//!
//! # Example
//!
//! ```
//! use mslider_core::{GestureDelta, GestureTarget, Notification, SliderConfig, SliderSession};
//!
//! let mut session = SliderSession::new(SliderConfig::range(2.0, 8.0))?;
//! session.start(GestureTarget::One);
//! session.move_by(GestureTarget::One, GestureDelta::horizontal(56.0));
//! let done = session.end(GestureTarget::One, GestureDelta::horizontal(56.0));
//!
//! assert_eq!(
//!     done.notifications,
//!     vec![Notification::ValuesChangeFinish(vec![4.0, 8.0])]
//! );
//! # Ok::<(), mslider_core::SliderConfigError>(())
//! ```

pub mod config;
pub mod constraint;
pub mod direction;
pub mod error;
pub mod marker;
pub mod notify;
pub mod render;
pub mod session;
mod sync;
pub mod value_space;

pub use config::{DEFAULT_SLIP_DISPLACEMENT, DEFAULT_TRACK_LENGTH, SliderConfig};
pub use constraint::{Bounds, MarkerId, OverlapPolicy, bounds_for};
pub use direction::LayoutDirection;
pub use error::{ConfigLoadError, SliderConfigError};
pub use marker::{DragPhase, MarkerState};
pub use notify::{DispatchReport, Notification, SliderObserver, deliver};
pub use render::{
    MarkerRenderState, MarkerRenderer, MarkerVariant, SelectedSegment, SliderRenderState,
    TrackLayout,
};
pub use session::{
    GestureDelta, GestureEvent, GestureTarget, POSITION_EPSILON, SliderEffect, SliderNoopReason,
    SliderSession, SliderTransition,
};
pub use value_space::{MAX_INDEX_COUNT, RangeDefinition, ValueSpace};

#![forbid(unsafe_code)]

//! Gesture replay harness for mslider.
//!
//! Reads a [`GestureScript`], drives a [`mslider::MultiSlider`] through it and
//! reports every delivered notification.

pub mod cli;
pub mod error;
pub mod replay;
pub mod script;

pub use error::{HarnessError, Result};
pub use replay::{Replay, ReplayLine, StepSummary, replay};
pub use script::{GestureScript, ScriptEvent, ScriptFormat};

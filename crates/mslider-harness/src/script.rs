#![forbid(unsafe_code)]

//! Gesture script format.
//!
//! A script is a slider configuration plus an ordered list of host events:
//!
//! ```toml
//! [config]
//! values = [2.0, 8.0]
//!
//! [[events]]
//! event = "start"
//! target = "one"
//!
//! [[events]]
//! event = "move"
//! target = "one"
//! dx = 56.0
//! ```
//!
//! The same structure is accepted as JSON.

use std::path::Path;

use clap::ValueEnum;
use mslider::{GestureDelta, GestureEvent, GestureTarget, SliderConfig};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// On-disk encoding of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptFormat {
    Json,
    Toml,
}

impl ScriptFormat {
    /// Guess from the file extension; anything but `.toml` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Start {
        target: GestureTarget,
    },
    Move {
        target: GestureTarget,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    End {
        target: GestureTarget,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Terminate {
        target: GestureTarget,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    TapTrack {
        x: f64,
    },
    Sync {
        config: SliderConfig,
    },
}

impl ScriptEvent {
    /// The gesture this event maps to, if it is one.
    #[must_use]
    pub fn gesture(&self) -> Option<(GestureTarget, GestureEvent)> {
        match *self {
            Self::Start { target } => Some((target, GestureEvent::Start)),
            Self::Move { target, dx, dy } => {
                Some((target, GestureEvent::Move(GestureDelta::new(dx, dy))))
            }
            Self::End { target, dx, dy } => Some((target, GestureEvent::End(GestureDelta::new(dx, dy)))),
            Self::Terminate { target, dx, dy } => {
                Some((target, GestureEvent::Terminate(GestureDelta::new(dx, dy))))
            }
            Self::TapTrack { .. } | Self::Sync { .. } => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Move { .. } => "move",
            Self::End { .. } => "end",
            Self::Terminate { .. } => "terminate",
            Self::TapTrack { .. } => "tap_track",
            Self::Sync { .. } => "sync",
        }
    }
}

/// Initial configuration plus the events to replay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureScript {
    pub config: SliderConfig,
    pub events: Vec<ScriptEvent>,
}

impl GestureScript {
    pub fn from_json_str(s: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, HarnessError> {
        Ok(toml::from_str(s)?)
    }

    pub fn parse(s: &str, format: ScriptFormat) -> Result<Self, HarnessError> {
        match format {
            ScriptFormat::Json => Self::from_json_str(s),
            ScriptFormat::Toml => Self::from_toml_str(s),
        }
    }

    /// Read a script, inferring the format from the extension unless given.
    pub fn load(path: impl AsRef<Path>, format: Option<ScriptFormat>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let format = format.unwrap_or_else(|| ScriptFormat::from_path(path));
        Self::parse(&content, format)
    }
}

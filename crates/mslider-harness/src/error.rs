#![forbid(unsafe_code)]

use mslider::SliderConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML script: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid slider config at step {step}: {source}")]
    Config {
        step: usize,
        #[source]
        source: SliderConfigError,
    },
}

impl HarnessError {
    /// Process exit code for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 3,
            Self::Json(_) | Self::Toml(_) => 2,
            Self::Config { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;

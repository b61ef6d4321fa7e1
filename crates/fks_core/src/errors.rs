use std::fmt;

use thiserror::Error;

/// Which retry loop ran out of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Primary,
    Secondary,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Primary => f.write_str("primary"),
            Level::Secondary => f.write_str("secondary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FksError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No acceptable {level} hash after {trials} trials")]
    TrialsExhausted { level: Level, trials: u32 },
}

pub type Result<T> = std::result::Result<T, FksError>;

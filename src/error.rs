//! Configuration errors
//!
//! Nothing inside a tick can fail; only loading tuning, visuals, or settings can.

use core::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed into the target type
    Parse(serde_json::Error),
    /// A numeric field is outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
    /// A sprite entry has a zero or negative dimension
    InvalidSpriteSize { kind: String, width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::OutOfRange { field, value } => {
                write!(f, "config field `{field}` out of range: {value}")
            }
            Self::InvalidSpriteSize {
                kind,
                width,
                height,
            } => write!(f, "sprite `{kind}` has invalid size {width}x{height}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

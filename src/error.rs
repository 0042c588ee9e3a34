// Error types: configuration problems and unsatisfiable level requests.
// Rejected moves are not errors; they surface as events instead.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("grid size must be between {min} and {max}, got {value}")]
    GridSizeOutOfRange { value: i32, min: i32, max: i32 },
    #[error("battery move cost cannot be negative, got {0}")]
    NegativeMoveCost(i32),
    #[error("battery charge rate cannot be negative, got {0}")]
    NegativeChargeRate(i32),
    #[error("sun move interval must be at least 1 ms")]
    ZeroSunInterval,
    #[error("tile size must be at least {min} px, got {value}")]
    TileTooSmall { value: i32, min: i32 },
}

/// Level generation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("a {0}x{0} grid has no room for dirt")]
    GridTooSmall(i32),
    #[error("level needs {needed} free cells but only {available} exist")]
    Unsatisfiable { needed: usize, available: usize },
}

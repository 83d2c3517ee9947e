//! Settings error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

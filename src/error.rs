//! Error types for gridtrace.
//!
//! The interpolation core itself never fails; these errors come from
//! configuration loading and hasher construction.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Error)]
pub enum GridError {
    /// Grid configuration or hasher settings are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config could not be parsed or formatted.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Serialization(format!("JSON: {}", err))
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        GridError::Serialization(format!("TOML decode: {}", err))
    }
}

#[cfg(feature = "toml")]
impl From<toml::ser::Error> for GridError {
    fn from(err: toml::ser::Error) -> Self {
        GridError::Serialization(format!("TOML encode: {}", err))
    }
}

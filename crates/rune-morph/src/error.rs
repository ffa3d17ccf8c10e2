//! Error types for the morph engine.

use thiserror::Error;

/// Result type for morph engine operations.
pub type Result<T> = std::result::Result<T, MorphError>;

/// Errors that can occur while configuring the engine or loading fonts.
///
/// Frame evaluation itself never fails; bad runtime input degrades to
/// ambient defaults instead.
#[derive(Error, Debug)]
pub enum MorphError {
    /// Font data could not be parsed.
    #[error("failed to load font: {0}")]
    FontLoad(String),

    /// A configuration value was not recognised.
    #[error("invalid {field}: {value:?}")]
    InvalidConfig { field: &'static str, value: String },

    /// Colour string was not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid colour: {0:?}")]
    InvalidColor(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MorphError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
        }
    }
}

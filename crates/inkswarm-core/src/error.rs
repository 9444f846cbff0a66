//! Error types for Inkswarm

use thiserror::Error;

/// The main error type for Inkswarm operations
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Surface error: {0}")]
    SurfaceError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Watch error: {0}")]
    WatchError(String),
}

/// Result type alias for Inkswarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

impl From<toml::de::Error> for SwarmError {
    fn from(err: toml::de::Error) -> Self {
        SwarmError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SwarmError {
    fn from(err: toml::ser::Error) -> Self {
        SwarmError::TomlSerError(err.to_string())
    }
}

// Error types module

use thiserror::Error;

/// Errors surfaced by the URL builder
///
/// There is no I/O behind a build, so nothing here is retryable. Unknown
/// option names are deliberately not an error: they pass through verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A configuration or options value had the wrong shape (non-object option
    /// map, malformed hex key, unreadable config file, etc.)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required argument was empty or missing
    #[error("Missing required param: {0}")]
    MissingParameter(&'static str),
}

impl BuilderError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        BuilderError::InvalidConfiguration(message.into())
    }
}

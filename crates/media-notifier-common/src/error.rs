//! Common error types used throughout media-notifier.
//!
//! Delivery failures are deliberately absent: the relay client reports those
//! as outcomes, not errors.

/// Common error type for media-notifier.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input was provided (bad config value, malformed item).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Querying the media catalog failed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Self::Catalog(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

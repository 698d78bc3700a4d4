//! Common error types used throughout filterbrr.
//!
//! Filter evaluation itself never fails; these errors cover the edges of the
//! system: configuration, announce normalization and I/O.

/// Common error type for filterbrr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is missing or inconsistent.
    #[error("Config error: {0}")]
    Config(String),

    /// An announce could not be turned into a release name.
    #[error("Normalize error: {0}")]
    Normalize(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Normalize error.
    pub fn normalize<S: Into<String>>(msg: S) -> Self {
        Self::Normalize(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

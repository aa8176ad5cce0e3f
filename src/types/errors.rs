//! Application error types.
//!
//! Only setup paths are fallible (configuration, layout selection, replay
//! scripts). Host callbacks never return errors: anything that cannot be
//! normalized is dropped as a no-op.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the bridge.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration or script contents.
    #[error("validation error: {0}")]
    Validation(String),

    /// No layout contract is known for the requested host version.
    #[error("unsupported host layout: {0}")]
    UnsupportedHost(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_host(msg: impl Into<String>) -> Self {
        Self::UnsupportedHost(msg.into())
    }
}

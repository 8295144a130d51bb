//! Error types shared across the store, persistence, and client layers.

use thiserror::Error;

/// Errors surfaced by the store's collaborators.
///
/// Hydration itself never fails: a missing or malformed snapshot degrades to
/// defaults. These variants cover the edges where the crate talks to the outside
/// world (files, config, client construction).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the persistence medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// The throttle configuration cannot schedule anything.
    #[error("invalid throttle configuration: {0}")]
    InvalidThrottle(String),

    /// The external client factory rejected a credential.
    #[error("client error: {0}")]
    Client(String),
}

impl StoreError {
    /// Creates a client error.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// Creates an invalid-throttle error.
    pub fn invalid_throttle(message: impl Into<String>) -> Self {
        Self::InvalidThrottle(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

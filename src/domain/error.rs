//! Error types for the zearch plugin.
//!
//! This module defines the centralized error type [`ZearchError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for zearch operations.
///
/// Covers network responses from the code-search backend, persistence of the
/// location fragment, theme loading, and store dispatch failures.
///
/// # Examples
///
/// ```
/// use zearch::ZearchError;
///
/// let err = ZearchError::Http { status: 502 };
/// assert_eq!(err.to_string(), "HTTP error: backend answered with status 502");
/// ```
#[derive(Debug, Error)]
pub enum ZearchError {
    /// The backend answered with a non-success status code.
    #[error("HTTP error: backend answered with status {status}")]
    Http {
        /// Status code returned by the backend.
        status: u16,
    },

    /// A response body or stored file could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing persisted plugin data failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A location fragment could not be decoded into a filename.
    #[error("Location error: {0}")]
    Location(String),

    /// Subscriptions kept dispatching follow-up actions past the cascade limit.
    ///
    /// Indicates a feedback loop between effects; the remaining queued
    /// actions are dropped.
    #[error("Dispatch cascade exceeded {limit} actions")]
    DispatchCascade {
        /// Maximum number of actions drained per external dispatch.
        limit: usize,
    },
}

/// A specialized `Result` type for zearch operations.
pub type Result<T> = std::result::Result<T, ZearchError>;

//! Error types for the Folio plugin.
//!
//! This module defines the centralized error type [`FolioError`] and a type alias
//! [`Result`] used throughout the crate. Errors never escape the plugin shim: every
//! failure is logged and degraded to a visible, non-blocking UI state.

use thiserror::Error;

/// The main error type for Folio operations.
///
/// Consolidates failures from the preference store, the catalog backend, theme
/// loading, and worker communication.
///
/// # Examples
///
/// ```
/// use folio::FolioError;
///
/// let err = FolioError::Http { status: 404 };
/// assert_eq!(err.to_string(), "Backend returned status 404");
/// ```
#[derive(Debug, Error)]
pub enum FolioError {
    /// Preference storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog backend answered with a non-success status.
    #[error("Backend returned status {status}")]
    Http {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The catalog backend answered with a body that is not the expected JSON shape.
    #[error("Could not decode backend response: {0}")]
    Decode(String),
}

/// A specialized `Result` type for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;

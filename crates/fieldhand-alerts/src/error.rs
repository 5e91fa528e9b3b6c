//! Error types for alert delivery

use thiserror::Error;

/// Errors that can occur while building or delivering notifications
#[derive(Error, Debug)]
pub enum NotifyError {
    /// A channel name did not resolve to any registered provider
    #[error("unknown provider: {name}. Available: {available}")]
    UnknownProvider {
        /// The requested channel name
        name: String,
        /// Comma-separated registered channel names
        available: String,
    },

    /// The provider selector was unusable
    #[error("invalid provider selector: {0}")]
    InvalidSelector(String),

    /// The formatter has no writer for the requested channel format
    #[error("unsupported message format: {0}")]
    UnsupportedFormat(String),

    /// A reserved provider was asked to deliver
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A severity name outside the closed set
    #[error("invalid severity level: {name}. Must be one of: critical, error, warning")]
    InvalidLevel {
        /// The rejected name
        name: String,
    },

    /// A delivery endpoint answered with a non-success status
    #[error("API error ({provider}): status {status}, {message}")]
    Api {
        /// Which channel hit the error
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Error message from the endpoint
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for alert operations
pub type Result<T> = std::result::Result<T, NotifyError>;

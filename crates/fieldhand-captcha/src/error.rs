//! Error types for the captcha subsystem.

use thiserror::Error;

/// Errors that can occur while resolving a captcha through the solving service.
#[derive(Error, Debug)]
pub enum CaptchaError {
    /// The service refused the submission because the account has no credits left
    #[error("solving service balance exhausted: {0}")]
    InsufficientBalance(String),

    /// The service refused the submission for any other reason
    #[error("solving service rejected the request: {0}")]
    ServiceRejected(String),

    /// The answer for a submitted challenge is not ready yet
    #[error("captcha not resolved yet: {0}")]
    NotReady(String),

    /// The challenge image URL was blank or the downloaded body was empty
    #[error("captcha image is empty")]
    EmptyImage,

    /// API error with status code
    #[error("API error: status {status}, {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response parsing error
    #[error("failed to parse service response: {0}")]
    Parse(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CaptchaError {
    /// Check if the error only means the answer is not ready yet.
    ///
    /// A not-ready answer is the one condition the resolver may retry; every
    /// other variant is final for the attempt.
    #[must_use]
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

/// Result type alias for captcha operations.
pub type Result<T> = std::result::Result<T, CaptchaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaptchaError::InsufficientBalance("No credits".to_string());
        assert_eq!(
            err.to_string(),
            "solving service balance exhausted: No credits"
        );

        let err = CaptchaError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: status 503, Service Unavailable");
    }

    #[test]
    fn test_is_not_ready() {
        let err = CaptchaError::NotReady("CAPCHA_NOT_READY".to_string());
        assert!(err.is_not_ready());

        let err = CaptchaError::ServiceRejected("ERROR_WRONG_USER_KEY".to_string());
        assert!(!err.is_not_ready());
    }
}

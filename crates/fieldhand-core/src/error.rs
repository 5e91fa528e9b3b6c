//! Core error types for the fieldhand worker.
//!
//! This module defines the central error taxonomy used across all subsystems.
//! Every failure the unattended worker can surface is a variant here, so the
//! alert pipeline can classify it without inspecting message strings.

use fieldhand_captcha::CaptchaError;
use thiserror::Error;

/// Central error type for worker operations.
///
/// Each variant represents a failure from a specific subsystem or a known
/// condition on the target site, allowing clear propagation and a stable
/// [`kind`](WorkerError::kind) name for alerting.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Captcha resolution errors (submission, polling, image handling)
    #[error("captcha error: {0}")]
    Captcha(#[from] CaptchaError),

    /// The target site rejected the account credentials
    #[error("login rejected for {login}")]
    InvalidCredentials {
        /// Account login the site refused
        login: String,
    },

    /// A work application could not be submitted
    #[error("could not submit work application: {reason}")]
    WorkApplicationFailed {
        /// What went wrong
        reason: String,
    },

    /// An automation target is missing or its page changed shape
    #[error("automation broken: {detail}")]
    AutomationBroken {
        /// Which expectation failed
        detail: String,
    },

    /// The item or action the worker was sent after does not exist
    #[error("target not found: {target}")]
    TargetNotFound {
        /// What was being looked for
        target: String,
    },

    /// The site offered nothing to do this cycle
    #[error("no work available this cycle")]
    NoWorkAvailable,

    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl WorkerError {
    /// Short stable name for the error kind.
    ///
    /// Alert notifications use this as their title, so the values stay fixed
    /// even when display messages change.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Captcha(err) => captcha_kind(err),
            Self::InvalidCredentials { .. } => "InvalidCredentials",
            Self::WorkApplicationFailed { .. } => "WorkApplicationFailed",
            Self::AutomationBroken { .. } => "AutomationBroken",
            Self::TargetNotFound { .. } => "TargetNotFound",
            Self::NoWorkAvailable => "NoWorkAvailable",
            Self::Config(_) => "Config",
            Self::Validation(_) => "Validation",
            Self::Io(_) => "Io",
            Self::Internal(_) => "Internal",
        }
    }
}

fn captcha_kind(err: &CaptchaError) -> &'static str {
    match err {
        CaptchaError::InsufficientBalance(_) => "InsufficientBalance",
        CaptchaError::ServiceRejected(_) => "ServiceRejected",
        CaptchaError::NotReady(_) => "CaptchaNotReady",
        CaptchaError::EmptyImage => "EmptyImage",
        CaptchaError::Api { .. } => "CaptchaApi",
        CaptchaError::Network(_) => "CaptchaNetwork",
        CaptchaError::Parse(_) => "CaptchaParse",
        CaptchaError::Internal(_) => "CaptchaInternal",
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found at an explicitly requested path
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `WorkerError`.
pub type Result<T> = std::result::Result<T, WorkerError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkerError::InvalidCredentials {
            login: "beergalich".to_string(),
        };
        assert_eq!(err.to_string(), "login rejected for beergalich");

        let err = WorkerError::NoWorkAvailable;
        assert_eq!(err.to_string(), "no work available this cycle");

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let worker_err: WorkerError = config_err.into();
        assert!(matches!(worker_err, WorkerError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let worker_err: WorkerError = io_err.into();
        assert!(matches!(worker_err, WorkerError::Io(_)));
    }

    #[test]
    fn test_error_from_captcha() {
        let captcha_err = CaptchaError::InsufficientBalance("No credits".to_string());
        let worker_err: WorkerError = captcha_err.into();
        assert!(matches!(worker_err, WorkerError::Captcha(_)));
        assert_eq!(worker_err.kind(), "InsufficientBalance");
    }

    #[test]
    fn test_kind_names_are_stable() {
        let cases = [
            (
                WorkerError::Captcha(CaptchaError::NotReady("CAPCHA_NOT_READY".to_string())),
                "CaptchaNotReady",
            ),
            (
                WorkerError::InvalidCredentials {
                    login: "x".to_string(),
                },
                "InvalidCredentials",
            ),
            (
                WorkerError::WorkApplicationFailed {
                    reason: "button missing".to_string(),
                },
                "WorkApplicationFailed",
            ),
            (
                WorkerError::AutomationBroken {
                    detail: "hunt page changed".to_string(),
                },
                "AutomationBroken",
            ),
            (
                WorkerError::TargetNotFound {
                    target: "auto item".to_string(),
                },
                "TargetNotFound",
            ),
            (WorkerError::NoWorkAvailable, "NoWorkAvailable"),
            (WorkerError::Internal("boom".to_string()), "Internal"),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }
}

//! Mapping from worker failures to alert severities

use crate::severity::Severity;
use fieldhand_captcha::CaptchaError;
use fieldhand_core::WorkerError;

/// Decide how bad a worker failure is.
///
/// Pure and total. Every error maps to a severity, and anything not
/// explicitly listed falls back to [`Severity::Error`] so new failure kinds
/// are reported loudly rather than silently dropped.
///
/// An exhausted solving-service balance is the one condition the worker can
/// never recover from on its own, which is what makes it critical.
#[must_use]
pub fn classify(error: &WorkerError) -> Severity {
    match error {
        WorkerError::Captcha(CaptchaError::InsufficientBalance(_)) => Severity::Critical,
        WorkerError::InvalidCredentials { .. }
        | WorkerError::WorkApplicationFailed { .. }
        | WorkerError::AutomationBroken { .. }
        | WorkerError::TargetNotFound { .. } => Severity::Error,
        WorkerError::NoWorkAvailable => Severity::Warning,
        _ => Severity::Error,
    }
}

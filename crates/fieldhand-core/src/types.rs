//! Shared types used across the fieldhand worker.
//!
//! This module defines common newtypes that provide type safety and clear
//! domain modeling.

use crate::error::WorkerError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for worker identifiers with validation.
///
/// Worker ids name the per-worker state files on disk, so they must be
/// lowercase alphanumeric with hyphens or underscores, 1-64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    /// Create a new `WorkerId` from a string.
    ///
    /// # Errors
    /// Returns error if the id doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, WorkerError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate worker id format: lowercase alphanumeric with hyphens or
    /// underscores, 1-64 characters.
    fn validate(id: &str) -> Result<(), WorkerError> {
        static WORKER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = WORKER_REGEX
            .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(WorkerError::Validation(format!(
                "invalid worker id: must be lowercase alphanumeric with hyphens or underscores, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
///
/// Provides serialization/deserialization and utility methods, including the
/// fixed `YYYY-MM-DD HH:MM UTC` rendering used by alert messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Create a timestamp from seconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns error if the value is outside the representable range.
    pub fn from_unix(secs: i64) -> Result<Self, WorkerError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| WorkerError::Validation(format!("invalid unix timestamp: {secs}")))
    }

    /// Parse a timestamp from an RFC3339 string.
    ///
    /// # Errors
    /// Returns error if the string is not valid RFC3339.
    pub fn from_rfc3339(s: &str) -> Result<Self, WorkerError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| WorkerError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Format for alert messages: `YYYY-MM-DD HH:MM UTC`.
    #[must_use]
    pub fn format_alert(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

//! Alert severity levels

use crate::error::NotifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How bad a reported condition is
///
/// The set is closed. Every notification carries exactly one of these, and
/// anything else is rejected at the string boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The worker cannot usefully continue and should stop
    Critical,
    /// A cycle failed but the next attempt may succeed
    Error,
    /// Routine condition worth a heads-up, nothing is broken
    Warning,
}

impl Severity {
    /// All severity levels, most severe first
    pub const ALL: [Severity; 3] = [Self::Critical, Self::Error, Self::Warning];

    /// Emoji used as the header glyph in chat channels
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Critical => "\u{1f534}",
            Self::Error => "\u{1f7e0}",
            Self::Warning => "\u{1f7e1}",
        }
    }

    /// Upper-case label used in message headers
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }

    /// Check if this is the critical level
    #[must_use]
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }

    /// Check if this is the error level
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if this is the warning level
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Severity {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            _ => Err(NotifyError::InvalidLevel {
                name: s.to_string(),
            }),
        }
    }
}

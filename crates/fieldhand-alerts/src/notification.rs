//! Immutable notification value object

use crate::severity::Severity;
use fieldhand_core::Timestamp;

/// Maximum number of stack frames carried in a notification
pub const STACK_TRACE_LIMIT: usize = 5;

/// Source name stamped on notifications when the caller does not set one
pub const DEFAULT_SOURCE: &str = "FIELDHAND";

/// Marker appended when the supplied frames exceed the limit
const TRUNCATION_MARKER: &str = "... (truncated)";

/// One alert, fully assembled at construction.
///
/// There are no setters. Everything the channels render is fixed when the
/// value is built, so what gets classified is exactly what gets delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    title: String,
    message: String,
    source: String,
    worker: Option<String>,
    actor: Option<String>,
    occurred_at: Timestamp,
    stack_trace: Option<Vec<String>>,
}

impl Notification {
    /// Create a notification with the required fields.
    ///
    /// The source defaults to [`DEFAULT_SOURCE`] and the timestamp to the
    /// current time. Optional fields are attached with the `with_*` builders.
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            source: DEFAULT_SOURCE.to_string(),
            worker: None,
            actor: None,
            occurred_at: Timestamp::now(),
            stack_trace: None,
        }
    }

    /// Set the reporting source name
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Name the worker the condition occurred in
    #[must_use]
    pub fn with_worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    /// Name the site account that was in use
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Override the timestamp
    #[must_use]
    pub fn with_occurred_at(mut self, occurred_at: Timestamp) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Attach stack frames, truncating past [`STACK_TRACE_LIMIT`].
    ///
    /// When more frames are supplied than the limit allows, the first
    /// `STACK_TRACE_LIMIT` are kept and a truncation marker is appended.
    #[must_use]
    pub fn with_stack_trace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stack_trace = Some(truncate_frames(frames));
        self
    }

    /// The severity level
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The short headline
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The descriptive body text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The reporting source name
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The worker name, if one was attached
    #[must_use]
    pub fn worker(&self) -> Option<&str> {
        self.worker.as_deref()
    }

    /// The site account, if one was attached
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// When the condition occurred
    #[must_use]
    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    /// The attached stack frames, if any
    #[must_use]
    pub fn stack_trace(&self) -> Option<&[String]> {
        self.stack_trace.as_deref()
    }

    /// Check if this notification is critical
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.severity.is_critical()
    }
}

fn truncate_frames<I, S>(frames: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut collected: Vec<String> = frames
        .into_iter()
        .take(STACK_TRACE_LIMIT + 1)
        .map(Into::into)
        .collect();
    if collected.len() > STACK_TRACE_LIMIT {
        collected.truncate(STACK_TRACE_LIMIT);
        collected.push(TRUNCATION_MARKER.to_string());
    }
    collected
}

/// Collect an error and its causes as display lines, outermost first.
///
/// The cause chain is what a notification ships in place of a backtrace:
/// each `source()` hop becomes one frame.
#[must_use]
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(cause.to_string());
        source = cause.source();
    }
    lines
}

//! Per-attempt captcha job state.

/// Lifecycle of one submitted challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Accepted by the service, answer pending
    Submitted,

    /// The last poll answered that the task is still in the queue
    NotReady,

    /// Decoded text received
    Ready,

    /// The service gave a final refusal
    Failed,
}

/// One captcha resolution attempt.
///
/// The resolver keeps a job only for the duration of a single resolution and
/// discards it afterwards; nothing about an attempt survives the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaJob {
    payload: String,
    external_id: Option<String>,
    status: JobStatus,
}

impl CaptchaJob {
    /// Create a job for an encoded challenge that is about to be submitted.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            external_id: None,
            status: JobStatus::Submitted,
        }
    }

    /// Record the task id the service answered the submission with.
    pub fn acknowledge(&mut self, external_id: impl Into<String>) {
        self.external_id = Some(external_id.into());
    }

    /// Record a poll that answered "still working".
    pub fn mark_not_ready(&mut self) {
        self.status = JobStatus::NotReady;
    }

    /// Record the decoded answer.
    pub fn mark_ready(&mut self) {
        self.status = JobStatus::Ready;
    }

    /// Record a final refusal.
    pub fn mark_failed(&mut self) {
        self.status = JobStatus::Failed;
    }

    /// Base64-encoded challenge image.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Service-side task id, present once the submission is acknowledged.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Check if the answer has arrived.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.status, JobStatus::Ready)
    }

    /// Check if the attempt ended in a refusal.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, JobStatus::Failed)
    }

    /// Check if the job is still waiting on the service.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, JobStatus::Submitted | JobStatus::NotReady)
    }
}

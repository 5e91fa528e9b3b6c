//! Captcha resolution workflow: submit, wait, poll, one bounded retry.

use crate::client::CaptchaApi;
use crate::error::{CaptchaError, Result};
use crate::job::CaptchaJob;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Wait before the first poll. Human solvers rarely answer faster.
pub const DEFAULT_FIRST_WAIT: Duration = Duration::from_secs(20);

/// Wait before the single retry poll.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(30);

/// Drives one challenge through the solving service.
///
/// The sequence is fixed: submit, wait, poll, and at most one more poll if
/// the service answered "not ready". The second answer is final either way;
/// the worker gets a fresh challenge on its next cycle instead of camping on
/// a stale one.
pub struct CaptchaResolver<A: CaptchaApi> {
    api: A,
    client: Client,
    first_wait: Duration,
    retry_wait: Duration,
}

impl<A: CaptchaApi> CaptchaResolver<A> {
    /// Create a resolver with the default wait schedule.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api: A) -> Result<Self> {
        Self::with_waits(api, DEFAULT_FIRST_WAIT, DEFAULT_RETRY_WAIT)
    }

    /// Create a resolver with a specific wait schedule.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_waits(api: A, first_wait: Duration, retry_wait: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CaptchaError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api,
            client,
            first_wait,
            retry_wait,
        })
    }

    /// Resolve an already base64-encoded challenge to its decoded text.
    ///
    /// # Errors
    /// Propagates submission refusals immediately; a poll that still answers
    /// "not ready" after the retry, or fails outright, ends the attempt.
    pub async fn solve(&self, payload: &str) -> Result<String> {
        let mut job = CaptchaJob::new(payload);

        let external_id = self.api.submit(job.payload()).await?;
        debug!("Challenge submitted, task id {external_id}");
        job.acknowledge(external_id);

        sleep(self.first_wait).await;

        match self.poll_job(&mut job).await {
            Err(err) if err.is_not_ready() => {
                warn!(
                    "Captcha not ready on first poll, retrying in {:?}",
                    self.retry_wait
                );
                sleep(self.retry_wait).await;
                self.poll_job(&mut job).await
            }
            outcome => outcome,
        }
    }

    /// Download the challenge image, encode it, and resolve it.
    ///
    /// # Errors
    /// Fails with `EmptyImage` when the URL is blank or the body is empty;
    /// otherwise propagates download and resolution failures.
    pub async fn solve_from_url(&self, image_url: &str) -> Result<String> {
        let image = self.fetch_image(image_url).await?;
        let payload = encode_payload(&image);
        self.solve(&payload).await
    }

    /// Download the challenge image bytes.
    ///
    /// # Errors
    /// Fails with `EmptyImage` when the URL is blank or the body is empty.
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        if image_url.trim().is_empty() {
            return Err(CaptchaError::EmptyImage);
        }

        let response = self.client.get(image_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptchaError::Api {
                status: status.as_u16(),
                message: format!("image fetch failed for {image_url}"),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(CaptchaError::EmptyImage);
        }

        Ok(bytes.to_vec())
    }

    async fn poll_job(&self, job: &mut CaptchaJob) -> Result<String> {
        let external_id = job
            .external_id()
            .ok_or_else(|| CaptchaError::Internal("job polled before acknowledgement".to_string()))?;

        match self.api.poll(external_id).await {
            Ok(text) => {
                job.mark_ready();
                Ok(text)
            }
            Err(err) => {
                if err.is_not_ready() {
                    job.mark_not_ready();
                } else {
                    job.mark_failed();
                }
                Err(err)
            }
        }
    }
}

/// Encode downloaded image bytes for submission.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

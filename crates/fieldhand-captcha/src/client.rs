//! HTTP client for a rucaptcha-style image solving service.

use crate::error::{CaptchaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://rucaptcha.com";

/// Response code the service uses for an exhausted account balance.
const ZERO_BALANCE_CODE: &str = "ERROR_ZERO_BALANCE";

/// Submission and polling operations offered by the solving service.
///
/// The resolver is generic over this trait so its waiting and retry sequence
/// can be exercised against scripted implementations.
#[async_trait]
pub trait CaptchaApi: Send + Sync {
    /// Submit a base64-encoded challenge image.
    ///
    /// Returns the service-side task id used for polling.
    async fn submit(&self, payload: &str) -> Result<String>;

    /// Ask for the decoded text of a previously submitted task.
    async fn poll(&self, id: &str) -> Result<String>;
}

/// API client for the human-backed captcha solving service.
///
/// Submission goes through `in.php` as a form-encoded POST, polling through
/// `res.php` as a GET; both answer JSON when `json=1` is sent.
pub struct SolverClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl SolverClient {
    /// Create a new client with the given API key.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new client against a specific service deployment.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CaptchaError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CaptchaApi for SolverClient {
    async fn submit(&self, payload: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/in.php", self.base_url))
            .form(&SubmitRequest {
                method: "base64",
                key: &self.api_key,
                body: payload,
                numeric: 4,
                json: 1,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CaptchaError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ServiceResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::Parse(format!("submit response: {e}")))?;

        submit_outcome(api_response)
    }

    async fn poll(&self, id: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/res.php", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("action", "get"),
                ("id", id),
                ("json", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CaptchaError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ServiceResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::Parse(format!("poll response: {e}")))?;

        poll_outcome(api_response)
    }
}

/// Interpret the service's answer to a submission.
fn submit_outcome(response: ServiceResponse) -> Result<String> {
    if response.accepted() {
        return Ok(response.request);
    }

    if response.request == ZERO_BALANCE_CODE {
        let detail = response.error_text.unwrap_or(response.request);
        return Err(CaptchaError::InsufficientBalance(detail));
    }

    Err(CaptchaError::ServiceRejected(response.describe()))
}

/// Interpret the service's answer to a poll.
///
/// Any zero status means the task is still in the workers' queue; the
/// `request` field then carries the service's code for the condition.
fn poll_outcome(response: ServiceResponse) -> Result<String> {
    if response.accepted() {
        Ok(response.request)
    } else {
        Err(CaptchaError::NotReady(response.request))
    }
}

// Service wire types

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    method: &'a str,
    key: &'a str,
    body: &'a str,
    numeric: u8,
    json: u8,
}

/// Wire shape shared by `in.php` and `res.php` in JSON mode.
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    status: StatusFlag,
    request: String,
    #[serde(default)]
    error_text: Option<String>,
}

impl ServiceResponse {
    fn accepted(&self) -> bool {
        self.status.is_ok()
    }

    fn describe(&self) -> String {
        match &self.error_text {
            Some(text) => format!("{} ({text})", self.request),
            None => self.request.clone(),
        }
    }
}

/// The service reports success as `1` but is inconsistent about the type:
/// the live endpoint answers with a JSON number while its documented
/// examples show a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusFlag {
    Number(i64),
    Text(String),
}

impl StatusFlag {
    fn is_ok(&self) -> bool {
        match self {
            Self::Number(n) => *n == 1,
            Self::Text(s) => s == "1",
        }
    }
}

//! Fieldhand Captcha - image captcha resolution through a human solving service.
//!
//! This crate drives numeric image captchas through a rucaptcha-style API so
//! an unattended worker can get past challenge pages without anyone watching.
//!
//! # Features
//!
//! - **Submit/poll client**: form-encoded submission, JSON answers, tolerant
//!   of the service's loose `status` typing
//! - **Bounded waiting**: one fixed wait before the first poll, exactly one
//!   retry when the answer is not ready yet
//! - **Image handling**: challenge download and base64 payload encoding
//! - **Scriptable seam**: the resolver is generic over [`CaptchaApi`] so the
//!   sequence is testable without a live service
//!
//! # Example
//!
//! ```rust,no_run
//! use fieldhand_captcha::{CaptchaResolver, SolverClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SolverClient::new("api-key")?;
//! let resolver = CaptchaResolver::new(client)?;
//!
//! let text = resolver.solve_from_url("https://example.com/captcha.png").await?;
//! println!("decoded: {text}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod job;
pub mod resolver;

// Re-export commonly used types
pub use client::{CaptchaApi, SolverClient, DEFAULT_BASE_URL};
pub use error::{CaptchaError, Result};
pub use job::{CaptchaJob, JobStatus};
pub use resolver::{
    encode_payload, CaptchaResolver, DEFAULT_FIRST_WAIT, DEFAULT_RETRY_WAIT,
};

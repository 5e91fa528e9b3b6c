//! Error classification and multi-channel alert delivery.
//!
//! This crate turns worker failures into operator notifications. A failure
//! is classified into a severity, rendered into channel-ready text, and
//! delivered through a named channel, and the run loop is told whether to
//! keep going or stop.
//!
//! # Features
//!
//! - Severity classification for worker errors
//! - Immutable notification values assembled at construction
//! - Telegram Markdown rendering with idempotent escaping
//! - Crash-proof dispatch: delivery failures are logged, never raised
//! - Run-loop dispositions: continue on errors, terminate on critical
//!
//! # Example
//!
//! ```rust,no_run
//! use fieldhand_alerts::{AlertPipeline, ProviderSelector, ReportContext};
//! use fieldhand_core::{AppConfig, WorkerError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let pipeline = AlertPipeline::from_config(&config)?;
//!
//! let error = WorkerError::NoWorkAvailable;
//! let disposition = pipeline
//!     .report(
//!         &error,
//!         &ProviderSelector::named("telegram"),
//!         &ReportContext::new().with_worker("work"),
//!     )
//!     .await?;
//!
//! if disposition.should_terminate() {
//!     // stop the run loop
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classify;
pub mod error;
pub mod format;
pub mod notification;
pub mod notifier;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod severity;

// Re-export commonly used types
pub use classify::classify;
pub use error::{NotifyError, Result};
pub use format::{ChannelFormat, MessageFormatter};
pub use notification::{error_chain, Notification, DEFAULT_SOURCE, STACK_TRACE_LIMIT};
pub use notifier::Notifier;
pub use pipeline::{AlertPipeline, Disposition, ReportContext};
pub use provider::{NotificationProvider, ProviderKind, ProviderSelector};
pub use providers::{EmailProvider, TelegramProvider};
pub use severity::Severity;

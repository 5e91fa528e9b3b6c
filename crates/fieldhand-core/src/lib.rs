//! Fieldhand Core - Foundation crate for the fieldhand worker.
//!
//! This crate provides the shared error taxonomy, configuration management,
//! common types, and work-cycle timing that the other fieldhand crates
//! depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error taxonomy using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`WorkerId`, `Timestamp`)
//! - [`cycle`] - Hourly cadence arithmetic and the last-action store
//!
//! # Example
//!
//! ```rust
//! use fieldhand_core::{cycle, AppConfig, Timestamp};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.worker.source, "FIELDHAND");
//!
//! // A worker with no history starts immediately
//! let wait = cycle::wait_time(None, Timestamp::now());
//! assert!(wait.is_zero());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod cycle;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CaptchaConfig, TelegramConfig, WorkerConfig};
pub use cycle::LastActionStore;
pub use error::{ConfigError, ConfigResult, Result, WorkerError};
pub use types::{Timestamp, WorkerId};

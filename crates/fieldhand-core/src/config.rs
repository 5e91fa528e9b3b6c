//! Configuration management for the fieldhand worker.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides for the secrets.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/fieldhand/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Worker behavior settings
    pub worker: WorkerConfig,
    /// Captcha solving service settings
    pub captcha: CaptchaConfig,
    /// Telegram notification settings
    pub telegram: TelegramConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error here: a caller
    /// that names a path expects it to exist.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `FIELDHAND_API_KEY`: Override the captcha service API key
    /// - `FIELDHAND_BOT_TOKEN`: Override the Telegram bot token
    /// - `FIELDHAND_CHAT_ID`: Override the Telegram chat id
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Secrets come from the environment in deployments; values are not logged
        if let Ok(val) = std::env::var("FIELDHAND_API_KEY") {
            config.captcha.api_key = val;
            tracing::debug!("Override captcha.api_key from env");
        }

        if let Ok(val) = std::env::var("FIELDHAND_BOT_TOKEN") {
            config.telegram.bot_token = val;
            tracing::debug!("Override telegram.bot_token from env");
        }

        if let Ok(val) = std::env::var("FIELDHAND_CHAT_ID") {
            config.telegram.chat_id = val;
            tracing::debug!("Override telegram.chat_id from env");
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/fieldhand/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "fieldhand", "fieldhand").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/fieldhand`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "fieldhand", "fieldhand").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Worker behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name reported as the source of alert notifications
    pub source: String,
    /// Directory for per-worker state files (default: XDG data dir)
    pub state_dir: Option<PathBuf>,
    /// Re-raise unclassified errors instead of notifying (development aid).
    /// Read by the embedding run loop; the alert pipeline ignores it.
    pub propagate_unclassified: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            source: "FIELDHAND".to_string(),
            state_dir: None,
            propagate_unclassified: false,
        }
    }
}

/// Captcha solving service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// API key for the solving service
    pub api_key: String,
    /// Service endpoint
    pub base_url: String,
    /// Wait before the first answer poll, in seconds
    pub first_wait_secs: u64,
    /// Wait before the single retry poll, in seconds
    pub retry_wait_secs: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: fieldhand_captcha::DEFAULT_BASE_URL.to_string(),
            first_wait_secs: 20,
            retry_wait_secs: 30,
        }
    }
}

/// Telegram notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,
    /// Chat id the bot posts to
    pub chat_id: String,
    /// Telegram Bot API endpoint
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_url: "https://api.telegram.org".to_string(),
        }
    }
}

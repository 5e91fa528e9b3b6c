//! Telegram delivery channel

use crate::error::{NotifyError, Result};
use crate::format::{ChannelFormat, MessageFormatter};
use crate::notification::Notification;
use crate::provider::NotificationProvider;
use async_trait::async_trait;
use fieldhand_core::TelegramConfig;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Sends notifications to a Telegram chat through a bot.
///
/// Uses the Bot API `sendMessage` method with Markdown parse mode, so the
/// text must already be escaped by the formatter.
pub struct TelegramProvider {
    bot_token: String,
    chat_id: String,
    api_url: String,
    client: Client,
}

impl TelegramProvider {
    /// Create a provider from the Telegram configuration section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_url: config.api_url.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }

    fn payload<'a>(&'a self, text: &'a str) -> SendMessageRequest<'a> {
        SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        }
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn enabled(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let text = MessageFormatter::render(notification, ChannelFormat::Telegram)?;

        let response = self
            .client
            .post(self.endpoint())
            .json(&self.payload(&text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifyError::Api {
                provider: "telegram",
                status: status.as_u16(),
                message: error_text,
            });
        }

        debug!("Telegram alert delivered to chat {}", self.chat_id);
        Ok(())
    }
}

// Telegram Bot API types

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(bot_token: &str, chat_id: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
            api_url: "https://api.telegram.org".to_string(),
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = TelegramProvider::new(&config("123:abc", "-100200300")).unwrap();
        assert_eq!(provider.name(), "telegram");
    }

    #[test]
    fn test_enabled_requires_token_and_chat() {
        assert!(TelegramProvider::new(&config("123:abc", "-100200300"))
            .unwrap()
            .enabled());
        assert!(!TelegramProvider::new(&config("", "-100200300"))
            .unwrap()
            .enabled());
        assert!(!TelegramProvider::new(&config("123:abc", ""))
            .unwrap()
            .enabled());
        assert!(!TelegramProvider::new(&config("", "")).unwrap().enabled());
    }

    #[test]
    fn test_endpoint_shape() {
        let provider = TelegramProvider::new(&config("123:abc", "-100200300")).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let provider = TelegramProvider::new(&config("123:abc", "-100200300")).unwrap();
        let value = serde_json::to_value(provider.payload("hello")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "chat_id": "-100200300",
                "text": "hello",
                "parse_mode": "Markdown",
            })
        );
    }
}

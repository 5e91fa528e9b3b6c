//! Delivery channel abstraction

use crate::error::NotifyError;
use crate::notification::Notification;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A channel that can carry a notification to a human
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Short channel name used in logs and registry lookups
    fn name(&self) -> &'static str;

    /// Whether the channel is configured well enough to deliver
    fn enabled(&self) -> bool;

    /// Deliver the notification
    async fn deliver(&self, notification: &Notification) -> crate::error::Result<()>;
}

/// The built-in channels a name can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Telegram bot message
    Telegram,
    /// Email, reserved for the daily digest
    Email,
}

impl ProviderKind {
    /// All built-in channels
    pub const ALL: [ProviderKind; 2] = [Self::Telegram, Self::Email];

    /// Registry name for the channel
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Email => "email",
        }
    }

    /// Comma-separated list of all registered channel names
    #[must_use]
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(Self::Telegram),
            "email" => Ok(Self::Email),
            _ => Err(NotifyError::UnknownProvider {
                name: s.to_string(),
                available: Self::available(),
            }),
        }
    }
}

/// How a caller points the notifier at a channel.
///
/// Most call sites name a built-in channel; handing over an instance
/// bypasses the registry entirely.
#[derive(Clone)]
pub enum ProviderSelector {
    /// Resolve a built-in channel by its registered name
    Named(String),
    /// Use the given provider directly
    Instance(Arc<dyn NotificationProvider>),
}

impl ProviderSelector {
    /// Select a built-in channel by name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Debug for ProviderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Instance(provider) => f.debug_tuple("Instance").field(&provider.name()).finish(),
        }
    }
}

impl From<ProviderKind> for ProviderSelector {
    fn from(kind: ProviderKind) -> Self {
        Self::Named(kind.name().to_string())
    }
}

//! Crash-proof notification dispatch

use crate::error::{NotifyError, Result};
use crate::notification::Notification;
use crate::provider::{NotificationProvider, ProviderKind, ProviderSelector};
use crate::providers::{EmailProvider, TelegramProvider};
use fieldhand_core::AppConfig;
use std::sync::Arc;
use tracing::{error, warn};

/// Resolves a selector to a channel and delivers through it.
///
/// Failures split two ways. Picking a channel that does not exist is a
/// caller bug and propagates; anything that goes wrong during formatting or
/// delivery is logged and swallowed. A broken alert channel must never take
/// the worker down with it.
pub struct Notifier {
    telegram: Arc<dyn NotificationProvider>,
    email: Arc<dyn NotificationProvider>,
}

impl Notifier {
    /// Build the channel registry from configuration.
    ///
    /// # Errors
    /// Returns error if a provider's HTTP client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            telegram: Arc::new(TelegramProvider::new(&config.telegram)?),
            email: Arc::new(EmailProvider::new()),
        })
    }

    /// Build a notifier with explicit channel instances
    #[must_use]
    pub fn with_providers(
        telegram: Arc<dyn NotificationProvider>,
        email: Arc<dyn NotificationProvider>,
    ) -> Self {
        Self { telegram, email }
    }

    /// Dispatch a notification through the selected channel.
    ///
    /// A disabled channel is skipped with a warning, and a delivery failure
    /// is logged. Both count as handled.
    ///
    /// # Errors
    /// Fails only on selector resolution: a blank or unknown channel name.
    pub async fn dispatch(
        &self,
        notification: &Notification,
        selector: &ProviderSelector,
    ) -> Result<()> {
        let provider = self.resolve(selector)?;

        if !provider.enabled() {
            warn!("{} is not enabled, skipping notification", provider.name());
            return Ok(());
        }

        if let Err(err) = provider.deliver(notification).await {
            error!("{} delivery failed: {err}", provider.name());
        }

        Ok(())
    }

    fn resolve(&self, selector: &ProviderSelector) -> Result<Arc<dyn NotificationProvider>> {
        match selector {
            ProviderSelector::Named(name) => {
                if name.trim().is_empty() {
                    return Err(NotifyError::InvalidSelector(
                        "provider name is blank".to_string(),
                    ));
                }
                let kind: ProviderKind = name.parse()?;
                Ok(self.by_kind(kind))
            }
            ProviderSelector::Instance(provider) => Ok(Arc::clone(provider)),
        }
    }

    fn by_kind(&self, kind: ProviderKind) -> Arc<dyn NotificationProvider> {
        match kind {
            ProviderKind::Telegram => Arc::clone(&self.telegram),
            ProviderKind::Email => Arc::clone(&self.email),
        }
    }
}

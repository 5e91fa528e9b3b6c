//! Email delivery channel, reserved for the daily digest

use crate::error::{NotifyError, Result};
use crate::notification::Notification;
use crate::provider::NotificationProvider;
use async_trait::async_trait;

/// Placeholder email channel.
///
/// Registered so the name resolves, but it reports itself disabled and
/// refuses delivery until the digest work lands.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailProvider;

impl EmailProvider {
    /// Create the placeholder provider
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationProvider for EmailProvider {
    fn name(&self) -> &'static str {
        "email"
    }

    fn enabled(&self) -> bool {
        false
    }

    async fn deliver(&self, _notification: &Notification) -> Result<()> {
        Err(NotifyError::NotImplemented(
            "email provider not implemented, reserved for daily digest".to_string(),
        ))
    }
}

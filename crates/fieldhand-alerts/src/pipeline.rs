//! Top-level alert facade for the worker run loop

use crate::classify::classify;
use crate::error::Result;
use crate::notification::{error_chain, Notification};
use crate::notifier::Notifier;
use crate::provider::ProviderSelector;
use crate::severity::Severity;
use fieldhand_core::{AppConfig, WorkerError};
use tracing::debug;

/// What the run loop should do after a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Resume the normal cadence
    Continue,
    /// Stop the worker, the condition needs a human
    Terminate,
}

impl Disposition {
    /// Check if the worker should stop
    #[must_use]
    pub fn should_terminate(&self) -> bool {
        matches!(self, Self::Terminate)
    }
}

/// Optional details about where a failure happened
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    /// Worker the failure occurred in
    pub worker: Option<String>,
    /// Site account that was in use
    pub actor: Option<String>,
}

impl ReportContext {
    /// Context with no details
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the worker
    #[must_use]
    pub fn with_worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    /// Name the site account
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Classifies failures, ships alerts, and tells the run loop what to do next.
///
/// The notification always goes out before the disposition comes back, so a
/// critical condition is on record before anyone acts on it.
pub struct AlertPipeline {
    notifier: Notifier,
    source: String,
}

impl AlertPipeline {
    /// Create a pipeline over an existing notifier
    #[must_use]
    pub fn new(notifier: Notifier, source: impl Into<String>) -> Self {
        Self {
            notifier,
            source: source.into(),
        }
    }

    /// Create a pipeline wired from configuration.
    ///
    /// # Errors
    /// Returns error if a provider cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            Notifier::from_config(config)?,
            config.worker.source.clone(),
        ))
    }

    /// Report a worker failure.
    ///
    /// Classifies the error, ships a notification through the selected
    /// channel, and returns whether the run loop should keep going. The
    /// error's kind becomes the title, its display text the message, and its
    /// cause chain the stack trace.
    ///
    /// # Errors
    /// Fails only on selector resolution; delivery problems are handled
    /// inside the notifier.
    pub async fn report(
        &self,
        error: &WorkerError,
        selector: &ProviderSelector,
        context: &ReportContext,
    ) -> Result<Disposition> {
        let severity = classify(error);
        debug!("Classified {} as {severity}", error.kind());

        let mut notification = self.build(severity, error.kind(), error.to_string(), context);
        let chain = error_chain(error);
        if chain.len() > 1 {
            notification = notification.with_stack_trace(chain);
        }

        self.notifier.dispatch(&notification, selector).await?;
        Ok(Self::disposition_for(severity))
    }

    /// Ship a critical alert with an explicit title and message
    ///
    /// # Errors
    /// Fails only on selector resolution.
    pub async fn critical(
        &self,
        title: &str,
        message: &str,
        selector: &ProviderSelector,
        context: &ReportContext,
    ) -> Result<Disposition> {
        self.send(Severity::Critical, title, message, selector, context)
            .await
    }

    /// Ship an error alert with an explicit title and message
    ///
    /// # Errors
    /// Fails only on selector resolution.
    pub async fn error(
        &self,
        title: &str,
        message: &str,
        selector: &ProviderSelector,
        context: &ReportContext,
    ) -> Result<Disposition> {
        self.send(Severity::Error, title, message, selector, context)
            .await
    }

    /// Ship a warning alert with an explicit title and message
    ///
    /// # Errors
    /// Fails only on selector resolution.
    pub async fn warning(
        &self,
        title: &str,
        message: &str,
        selector: &ProviderSelector,
        context: &ReportContext,
    ) -> Result<Disposition> {
        self.send(Severity::Warning, title, message, selector, context)
            .await
    }

    async fn send(
        &self,
        severity: Severity,
        title: &str,
        message: &str,
        selector: &ProviderSelector,
        context: &ReportContext,
    ) -> Result<Disposition> {
        let notification = self.build(severity, title, message, context);
        self.notifier.dispatch(&notification, selector).await?;
        Ok(Self::disposition_for(severity))
    }

    fn build(
        &self,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        context: &ReportContext,
    ) -> Notification {
        let mut notification =
            Notification::new(severity, title, message).with_source(self.source.clone());
        if let Some(worker) = &context.worker {
            notification = notification.with_worker(worker);
        }
        if let Some(actor) = &context.actor {
            notification = notification.with_actor(actor);
        }
        notification
    }

    fn disposition_for(severity: Severity) -> Disposition {
        if severity.is_critical() {
            Disposition::Terminate
        } else {
            Disposition::Continue
        }
    }
}

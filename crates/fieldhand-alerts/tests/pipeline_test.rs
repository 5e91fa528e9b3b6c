//! Integration tests for the alert pipeline
//!
//! Tests the complete flow from a worker failure through classification,
//! rendering, and dispatch to the run-loop disposition.

use async_trait::async_trait;
use fieldhand_alerts::{
    AlertPipeline, ChannelFormat, Disposition, MessageFormatter, Notification,
    NotificationProvider, Notifier, NotifyError, ProviderSelector, ReportContext, Severity,
};
use fieldhand_captcha::CaptchaError;
use fieldhand_core::WorkerError;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

struct CapturingProvider {
    name: &'static str,
    enabled: bool,
    fail: bool,
    deliveries: AtomicU32,
    captured: Mutex<Vec<Notification>>,
}

impl CapturingProvider {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            enabled: true,
            fail: false,
            deliveries: AtomicU32::new(0),
            captured: Mutex::new(Vec::new()),
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            enabled: true,
            fail: true,
            deliveries: AtomicU32::new(0),
            captured: Mutex::new(Vec::new()),
        })
    }

    fn delivery_count(&self) -> u32 {
        self.deliveries.load(Ordering::SeqCst)
    }

    fn last(&self) -> Notification {
        self.captured
            .lock()
            .expect("captured lock")
            .last()
            .cloned()
            .expect("at least one delivery")
    }
}

#[async_trait]
impl NotificationProvider for CapturingProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        self.captured
            .lock()
            .expect("captured lock")
            .push(notification.clone());
        if self.fail {
            return Err(NotifyError::Api {
                provider: self.name,
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        Ok(())
    }
}

/// Create a pipeline whose telegram channel is the given capturing mock
fn pipeline_with(telegram: Arc<CapturingProvider>) -> AlertPipeline {
    let email = CapturingProvider::new("email");
    let notifier = Notifier::with_providers(telegram, email);
    AlertPipeline::new(notifier, "FIELDHAND")
}

#[tokio::test]
async fn test_critical_failure_terminates_the_run_loop() {
    let telegram = CapturingProvider::new("telegram");
    let pipeline = pipeline_with(Arc::clone(&telegram));

    let error = WorkerError::Captcha(CaptchaError::InsufficientBalance(
        "No credits left".to_string(),
    ));
    let context = ReportContext::new()
        .with_worker("work")
        .with_actor("beergalich");

    let disposition = pipeline
        .report(&error, &ProviderSelector::named("telegram"), &context)
        .await
        .expect("report should dispatch");

    // An exhausted balance is the stop-everything condition
    assert_eq!(disposition, Disposition::Terminate);
    assert!(disposition.should_terminate());
    assert_eq!(telegram.delivery_count(), 1);

    // The notification carries the error kind as title and the context fields
    let notification = telegram.last();
    assert_eq!(notification.severity(), Severity::Critical);
    assert_eq!(notification.title(), "InsufficientBalance");
    assert_eq!(notification.worker(), Some("work"));
    assert_eq!(notification.actor(), Some("beergalich"));
    assert_eq!(notification.source(), "FIELDHAND");

    // The cause chain rides along as the stack trace
    let frames = notification.stack_trace().expect("cause chain attached");
    assert_eq!(frames.len(), 2);
    assert!(frames[1].contains("balance exhausted"));

    // The rendered header names the condition at a glance
    let text = MessageFormatter::render(&notification, ChannelFormat::Telegram)
        .expect("telegram rendering");
    assert!(text.starts_with("🔴 CRITICAL: InsufficientBalance"));
    assert!(text.contains("*Worker:* work"));
    assert!(text.contains("*User:* beergalich"));
}

#[tokio::test]
async fn test_routine_conditions_continue_the_run_loop() {
    let telegram = CapturingProvider::new("telegram");
    let pipeline = pipeline_with(Arc::clone(&telegram));

    // No work this cycle is a heads-up, not a failure
    let disposition = pipeline
        .report(
            &WorkerError::NoWorkAvailable,
            &ProviderSelector::named("telegram"),
            &ReportContext::new(),
        )
        .await
        .expect("report should dispatch");

    assert_eq!(disposition, Disposition::Continue);
    let notification = telegram.last();
    assert_eq!(notification.severity(), Severity::Warning);
    assert_eq!(notification.title(), "NoWorkAvailable");
    assert_eq!(notification.message(), "no work available this cycle");
    assert_eq!(notification.stack_trace(), None);

    // An ordinary cycle failure also continues
    let disposition = pipeline
        .report(
            &WorkerError::AutomationBroken {
                detail: "session form changed".to_string(),
            },
            &ProviderSelector::named("telegram"),
            &ReportContext::new(),
        )
        .await
        .expect("report should dispatch");

    assert_eq!(disposition, Disposition::Continue);
    assert_eq!(telegram.last().severity(), Severity::Error);
    assert_eq!(telegram.delivery_count(), 2);
}

#[tokio::test]
async fn test_unknown_channel_propagates_without_delivery() {
    let telegram = CapturingProvider::new("telegram");
    let pipeline = pipeline_with(Arc::clone(&telegram));

    let err = pipeline
        .report(
            &WorkerError::NoWorkAvailable,
            &ProviderSelector::named("slack"),
            &ReportContext::new(),
        )
        .await
        .expect_err("unknown channel is a caller bug");

    assert_eq!(
        err.to_string(),
        "unknown provider: slack. Available: telegram, email"
    );
    assert_eq!(telegram.delivery_count(), 0);
}

#[tokio::test]
async fn test_delivery_failure_still_yields_a_disposition() {
    let telegram = CapturingProvider::failing("telegram");
    let pipeline = pipeline_with(Arc::clone(&telegram));

    let error = WorkerError::Captcha(CaptchaError::InsufficientBalance(
        "No credits left".to_string(),
    ));

    let disposition = pipeline
        .report(&error, &ProviderSelector::named("telegram"), &ReportContext::new())
        .await
        .expect("delivery failures are swallowed");

    // The channel broke, but the run loop still learns it must stop
    assert_eq!(disposition, Disposition::Terminate);
    assert_eq!(telegram.delivery_count(), 1);
}

#[tokio::test]
async fn test_explicit_level_helpers() {
    let telegram = CapturingProvider::new("telegram");
    let pipeline = pipeline_with(Arc::clone(&telegram));
    let selector = ProviderSelector::named("telegram");
    let context = ReportContext::new();

    let disposition = pipeline
        .critical("BalanceExhausted", "top up the account", &selector, &context)
        .await
        .expect("critical dispatch");
    assert_eq!(disposition, Disposition::Terminate);
    assert_eq!(telegram.last().severity(), Severity::Critical);

    let disposition = pipeline
        .error("CycleFailed", "will retry next hour", &selector, &context)
        .await
        .expect("error dispatch");
    assert_eq!(disposition, Disposition::Continue);
    assert_eq!(telegram.last().severity(), Severity::Error);

    let disposition = pipeline
        .warning("NothingToDo", "empty listing", &selector, &context)
        .await
        .expect("warning dispatch");
    assert_eq!(disposition, Disposition::Continue);
    assert_eq!(telegram.last().severity(), Severity::Warning);

    assert_eq!(telegram.delivery_count(), 3);
}

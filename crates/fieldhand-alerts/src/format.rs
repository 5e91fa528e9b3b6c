//! Channel-specific notification rendering

use crate::error::{NotifyError, Result};
use crate::notification::Notification;
use std::fmt;

/// Characters Telegram's Markdown parser treats as markup
const MARKDOWN_CHARS: [char; 5] = ['_', '*', '`', '[', ']'];

/// Channel formats the formatter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    /// Telegram Markdown
    Telegram,
    /// Plain-text email, reserved for the daily digest
    Email,
}

impl fmt::Display for ChannelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Telegram => "telegram",
            Self::Email => "email",
        };
        write!(f, "{name}")
    }
}

/// Renders notifications into channel-ready text
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render a notification for the given channel format.
    ///
    /// # Errors
    /// Returns `UnsupportedFormat` for channels without a writer yet.
    pub fn render(notification: &Notification, format: ChannelFormat) -> Result<String> {
        match format {
            ChannelFormat::Telegram => Ok(Self::render_telegram(notification)),
            ChannelFormat::Email => Err(NotifyError::UnsupportedFormat("email".to_string())),
        }
    }

    /// Telegram Markdown layout: severity header, metadata block, message,
    /// then the stack trace with each frame in a code span.
    ///
    /// Every caller-supplied value is escaped; only the formatter's own
    /// labels and the timestamp are emitted verbatim.
    fn render_telegram(notification: &Notification) -> String {
        let severity = notification.severity();
        let mut lines = vec![
            format!(
                "{} {}: {}",
                severity.emoji(),
                severity.label(),
                escape_markdown(notification.title())
            ),
            String::new(),
            format!("*Source:* {}", escape_markdown(notification.source())),
        ];

        if let Some(worker) = notification.worker() {
            lines.push(format!("*Worker:* {}", escape_markdown(worker)));
        }
        if let Some(actor) = notification.actor() {
            lines.push(format!("*User:* {}", escape_markdown(actor)));
        }
        lines.push(format!(
            "*Time:* {}",
            notification.occurred_at().format_alert()
        ));

        lines.push(String::new());
        lines.push("*Message:*".to_string());
        lines.push(escape_markdown(notification.message()));

        if let Some(frames) = notification.stack_trace() {
            if !frames.is_empty() {
                lines.push(String::new());
                lines.push("*Stack trace:*".to_string());
                for frame in frames {
                    lines.push(format!("`{}`", escape_markdown(frame)));
                }
            }
        }

        lines.join("\n")
    }
}

/// Escape Telegram Markdown control characters in caller-supplied text.
///
/// A character whose preceding backslash is itself unescaped is left alone,
/// which makes the function idempotent: escaping already-escaped text
/// changes nothing.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if MARKDOWN_CHARS.contains(&c) && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

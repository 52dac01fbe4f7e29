//! User-facing status messages.
//!
//! Every recoverable condition of a run (unreadable file, no matches,
//! empty filter result, failed export) ends up here rather than as an
//! error returned to the caller. `success` messages carry an auto-dismiss
//! delay; the other levels persist until replaced.

use std::io::{self, Write};
use std::time::Duration;

use anstyle::Style;
use serde::{Deserialize, Serialize};

use crate::styled_output::Styles;

/// Default auto-dismiss delay for `success` messages.
pub const DEFAULT_SUCCESS_DISMISS: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Info => "info",
            StatusLevel::Success => "success",
            StatusLevel::Warning => "warning",
            StatusLevel::Error => "error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            StatusLevel::Info => "ℹ",
            StatusLevel::Success => "✓",
            StatusLevel::Warning => "⚠",
            StatusLevel::Error => "✗",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    /// Set for `success` only.
    pub dismiss_after: Option<Duration>,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: impl Into<String>, success_ttl: Duration) -> Self {
        Self {
            level,
            text: text.into(),
            dismiss_after: (level == StatusLevel::Success).then_some(success_ttl),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.dismiss_after.is_none()
    }
}

/// Ordered log of the messages raised during one run.
#[derive(Debug, Clone)]
pub struct StatusLog {
    messages: Vec<StatusMessage>,
    success_ttl: Duration,
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::with_success_ttl(DEFAULT_SUCCESS_DISMISS)
    }
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_success_ttl(success_ttl: Duration) -> Self {
        Self {
            messages: Vec::new(),
            success_ttl,
        }
    }

    pub fn push(&mut self, level: StatusLevel, text: impl Into<String>) -> &StatusMessage {
        let msg = StatusMessage::new(level, text, self.success_ttl);
        self.messages.push(msg);
        &self.messages[self.messages.len() - 1]
    }

    pub fn info(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.push(StatusLevel::Info, text)
    }

    pub fn success(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.push(StatusLevel::Success, text)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.push(StatusLevel::Warning, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.push(StatusLevel::Error, text)
    }

    pub fn messages(&self) -> &[StatusMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&StatusMessage> {
        self.messages.last()
    }

    pub fn extend(&mut self, other: StatusLog) {
        self.messages.extend(other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Prints status lines to stderr, gated by verbosity.
///
/// Verbosity levels:
/// 0 - silent
/// 1 - errors
/// 2 - everything (default)
pub struct StatusReporter {
    verbose: u8,
    styles: Styles,
    use_colors: bool,
}

impl StatusReporter {
    pub fn new(verbose: u8, use_colors: bool) -> Self {
        Self {
            verbose,
            styles: Styles::default(),
            use_colors,
        }
    }

    /// Whether a message of `level` is shown at the current verbosity.
    pub fn enabled(&self, level: StatusLevel) -> bool {
        match level {
            StatusLevel::Error => self.verbose >= 1,
            StatusLevel::Warning | StatusLevel::Info | StatusLevel::Success => self.verbose >= 2,
        }
    }

    /// Render one line without writing it.
    pub fn render(&self, msg: &StatusMessage) -> String {
        let style: &Style = match msg.level {
            StatusLevel::Info => &self.styles.info,
            StatusLevel::Success => &self.styles.success,
            StatusLevel::Warning => &self.styles.warning,
            StatusLevel::Error => &self.styles.error,
        };
        let head = format!("{} {}:", msg.level.icon(), msg.level);
        if self.use_colors {
            format!("{}{}{} {}", style.render(), head, style.render_reset(), msg.text)
        } else {
            format!("{head} {}", msg.text)
        }
    }

    pub fn report(&self, msg: &StatusMessage) {
        if !self.enabled(msg.level) {
            return;
        }
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}", self.render(msg));
    }

    pub fn report_all(&self, log: &StatusLog) {
        for msg in log.messages() {
            self.report(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_auto_dismisses() {
        let mut log = StatusLog::new();
        assert_eq!(
            log.success("done").dismiss_after,
            Some(DEFAULT_SUCCESS_DISMISS)
        );
        assert!(log.warning("careful").is_persistent());
        assert!(log.error("broken").is_persistent());
        assert!(log.info("fyi").is_persistent());
        assert_eq!(log.last().unwrap().level, StatusLevel::Info);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn custom_success_ttl() {
        let mut log = StatusLog::with_success_ttl(Duration::from_millis(250));
        assert_eq!(
            log.success("ok").dismiss_after,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn verbosity_gating() {
        let quiet = StatusReporter::new(0, false);
        assert!(!quiet.enabled(StatusLevel::Error));
        let errors_only = StatusReporter::new(1, false);
        assert!(errors_only.enabled(StatusLevel::Error));
        assert!(!errors_only.enabled(StatusLevel::Warning));
        let default = StatusReporter::new(2, false);
        assert!(default.enabled(StatusLevel::Success));
        assert!(default.enabled(StatusLevel::Warning));
    }

    #[test]
    fn plain_render() {
        let reporter = StatusReporter::new(2, false);
        let msg = StatusMessage::new(
            StatusLevel::Warning,
            "No domains match your filter",
            DEFAULT_SUCCESS_DISMISS,
        );
        assert_eq!(reporter.render(&msg), "⚠ warning: No domains match your filter");
    }
}

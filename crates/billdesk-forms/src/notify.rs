//! # Notifications
//!
//! User-facing notices (toasts) go through an injected [`Reporter`] instead
//! of a global toast singleton, so handlers can be tested without a UI.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ErrorSummary;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Notice::new(NoticeLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&ErrorSummary> for Notice {
    fn from(summary: &ErrorSummary) -> Self {
        let notice = Notice::error(summary.message.clone());
        if summary.field_errors.is_empty() {
            return notice;
        }
        let fields: Vec<&str> = summary.field_errors.keys().map(String::as_str).collect();
        notice.with_description(format!("Check: {}", fields.join(", ")))
    }
}

/// Receives notices for the user.
pub trait Reporter {
    fn report(&self, notice: Notice);
}

/// Sends notices to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(title = %notice.title, description, "notice")
            }
            NoticeLevel::Warning => warn!(title = %notice.title, description, "notice"),
            NoticeLevel::Error => error!(title = %notice.title, description, "notice"),
        }
    }
}

/// Keeps every notice it receives. Handy in tests and previews.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .expect("Reporter mutex poisoned")
            .clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("Reporter mutex poisoned")
            .push(notice);
    }
}

//! Error classification and user-facing notices.
//!
//! Raw store failures are mapped into a closed taxonomy of calendar
//! error kinds, each with a fixed user-facing message. The `Notifier`
//! collects the resulting toasts for presentation to drain; silent
//! notices are recorded for diagnostics only.

use calgrid_core::StoreError;
use tracing::{debug, warn};

/// Closed taxonomy of user-visible calendar failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyncFailed,
    EventCreateFailed,
    EventUpdateFailed,
    EventDeleteFailed,
    Unknown,
}

impl ErrorKind {
    /// Fixed message shown when the server did not supply one.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::SyncFailed => "Could not sync your calendar. Your changes are kept locally.",
            ErrorKind::EventCreateFailed => "The event could not be created.",
            ErrorKind::EventUpdateFailed => "The event could not be updated.",
            ErrorKind::EventDeleteFailed => "The event could not be deleted.",
            ErrorKind::Unknown => "Something went wrong. Please try again.",
        }
    }
}

/// Severity of a notice, for presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A single toast notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub kind: Option<ErrorKind>,
    pub message: String,
}

/// Classify a store failure into a notice.
///
/// Timeouts classify as `Unknown` regardless of the operation that
/// timed out. A server-supplied message (`StoreError::Api`) passes
/// through verbatim; everything else gets the kind's fixed message.
pub fn classify(kind: ErrorKind, err: &StoreError) -> Notice {
    let (kind, message) = match err {
        StoreError::Timeout(_) => (ErrorKind::Unknown, ErrorKind::Unknown.user_message().to_string()),
        StoreError::Api(msg) => (kind, msg.clone()),
        _ => (kind, kind.user_message().to_string()),
    };
    Notice {
        severity: Severity::Error,
        kind: Some(kind),
        message,
    }
}

/// Collects pending toasts. Owned by the session; presentation drains
/// it after every user action.
#[derive(Debug, Default)]
pub struct Notifier {
    pending: Vec<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    /// Queue a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.pending.push(Notice {
            severity: Severity::Info,
            kind: None,
            message: message.into(),
        });
    }

    /// Classify and queue a failure toast.
    pub fn failure(&mut self, kind: ErrorKind, err: &StoreError) {
        let notice = classify(kind, err);
        warn!(?kind, %err, "calendar operation failed");
        self.pending.push(notice);
    }

    /// Record a failure without surfacing it to the user. Used for the
    /// very first settings fetch, where failure should not alarm the
    /// user.
    pub fn failure_silent(&mut self, kind: ErrorKind, err: &StoreError) {
        warn!(?kind, %err, "calendar operation failed (silent)");
    }

    /// Take all pending toasts, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        debug!(count = self.pending.len(), "draining notices");
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

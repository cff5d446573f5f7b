//! User-facing notices.
//!
//! The store stays presentation-agnostic: operations return structured
//! `Result`s, and [`NoticeBus`] is the thin adapter that turns outcomes
//! into fire-and-forget [`Notice`] values for whatever UI layer is
//! subscribed. Success notices accompany every confirmed mutation; error
//! notices accompany every failure path.

use tokio::sync::broadcast;

/// Buffer capacity for the notice channel.
const NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A short, human-readable toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

/// Fan-out channel for notices.
///
/// Publishing with no subscribers silently drops the notice, which is the
/// fire-and-forget contract: data operations never block or fail on the
/// presentation layer.
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(NOTICE_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.publish(Severity::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.publish(Severity::Error, text.into());
    }

    fn publish(&self, severity: Severity, text: String) {
        // SendError only means there are zero subscribers.
        let _ = self.sender.send(Notice { severity, text });
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

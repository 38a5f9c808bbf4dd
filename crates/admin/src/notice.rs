//! Transient user-facing notifications.
//!
//! The console communicates action outcomes through short-lived, dismissible
//! notices; the rendering shell drains the queue and shows them however it
//! likes. Every failure class ends up here as terminal-for-the-action text:
//! nothing retries, nothing is fatal.

use std::collections::VecDeque;

/// Maximum notices retained before the oldest are dropped.
const MAX_PENDING: usize = 16;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Bounded FIFO queue of pending notices.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    /// Append a notice, dropping the oldest beyond the cap.
    pub fn push(&mut self, notice: Notice) {
        if self.pending.len() == MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(notice);
    }

    /// Drain all pending notices, oldest first.
    pub fn take(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }

    /// Whether any notices are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//! Transient, auto-dismissing user notifications.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

/// Active notifications. New entries overlap older ones rather than queueing
/// or suppressing them; expired entries drop out on the next read.
#[derive(Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notify_at(kind, message, Instant::now());
    }

    pub(crate) fn notify_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) {
        let message = message.into();
        log::debug!("notify: kind={kind:?} message={message}");
        self.entries.push(Notification {
            kind,
            message,
            expires_at: now + NOTIFICATION_TTL,
        });
    }

    /// The notifications still visible, pruning any whose delay has elapsed.
    pub fn active(&mut self) -> &[Notification] {
        self.active_at(Instant::now())
    }

    pub(crate) fn active_at(&mut self, now: Instant) -> &[Notification] {
        self.entries.retain(|entry| entry.expires_at > now);
        &self.entries
    }
}

//! Transient notifications ("toasts") reporting the outcome of each operation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2500);

/// Upper bound on queued notifications; the oldest are dropped first.
const MAX_QUEUED: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(Level::Success, "Success", description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Error, title, description)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::new(Level::Info, "Info", description)
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Queue of visible notifications with their display deadlines.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<(Notification, Instant)>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        let deadline = now + notification.duration;
        self.queue.push_back((notification, deadline));
        while self.queue.len() > MAX_QUEUED {
            self.queue.pop_front();
        }
    }

    /// Drop every notification whose deadline has passed
    pub fn prune(&mut self, now: Instant) {
        self.queue.retain(|(_, deadline)| *deadline > now);
    }

    /// Most recent visible notification
    pub fn current(&self) -> Option<&Notification> {
        self.queue.back().map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

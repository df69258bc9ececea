use std::time::Duration;
use tokio::time::Instant;

/// Transient, auto-dismissing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    raised_at: Instant,
    duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
            duration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn expires_at(&self) -> Instant {
        self.raised_at + self.duration
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a transient notification stays on screen, in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 4000;

/// Outcome a notification reports.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// How a notification is dismissed.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationDisplay {
    /// Banner that hides itself after [`NOTIFICATION_TTL_MS`].
    Transient,
    /// Dialog that stays until the user acknowledges it.
    Alert,
}

/// User-facing message raised when a submission settles.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub display: NotificationDisplay,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn transient(
        kind: NotificationKind,
        message: impl Into<String>,
        raised_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            display: NotificationDisplay::Transient,
            message: message.into(),
            raised_at,
        }
    }

    pub fn alert(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Self {
            kind: NotificationKind::Error,
            display: NotificationDisplay::Alert,
            message: message.into(),
            raised_at,
        }
    }

    /// Moment a transient notification disappears; alerts never expire.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.display {
            NotificationDisplay::Transient => {
                Some(self.raised_at + Duration::milliseconds(NOTIFICATION_TTL_MS))
            }
            NotificationDisplay::Alert => None,
        }
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|expires_at| now < expires_at)
    }
}

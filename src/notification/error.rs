//! Notification system error types.

use thiserror::Error;

/// Errors that can occur while showing a completion notice.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The desktop notification service rejected or failed the request.
    #[error("failed to send notification: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => {
                "check that a notification daemon is running, or run `settings set enable-notifications off`"
            }
        }
    }
}

//! Desktop notices through the platform notification service.

use notify_rust::{Notification, Timeout};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::error::NotificationError;
use super::Notifier;

/// Application name shown as the notice summary.
pub const APP_NAME: &str = "Pomodoro Productivity";

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u32 = 5000;

/// Shows notices with `notify-rust`.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn build(message: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(APP_NAME)
            .body(message)
            .appname(APP_NAME)
            .timeout(Timeout::Milliseconds(NOTICE_TIMEOUT_MS));
        notification
    }
}

impl Notifier for DesktopNotifier {
    fn show_notice(&self, message: &str) -> Result<(), NotificationError> {
        let notification = Self::build(message);

        // notify-rust starts its own executor; off the runtime thread it cannot nest.
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    if let Err(e) = notification.show() {
                        warn!("Failed to show notice: {}", e);
                    }
                });
                debug!("Notice queued");
                Ok(())
            }
            Err(_) => notification
                .show()
                .map(drop)
                .map_err(|e| NotificationError::SendFailed(e.to_string())),
        }
    }
}

//! Completion notices.
//!
//! A short notice is shown when a phase ends: "Work session complete!" after
//! work, "Break time is over!" after a break. The engine talks to a
//! [`Notifier`]; the binary plugs in [`DesktopNotifier`].

mod desktop;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use self::desktop::{DesktopNotifier, APP_NAME, NOTICE_TIMEOUT_MS};
pub use self::error::NotificationError;

use crate::types::TimerPhase;

/// Notice shown when a work session ends.
pub const WORK_COMPLETE_NOTICE: &str = "Work session complete!";

/// Notice shown when a break ends.
pub const BREAK_COMPLETE_NOTICE: &str = "Break time is over!";

/// Returns the notice for the phase that just finished.
pub fn completion_notice(finished: TimerPhase) -> &'static str {
    match finished {
        TimerPhase::Work => WORK_COMPLETE_NOTICE,
        TimerPhase::Break => BREAK_COMPLETE_NOTICE,
    }
}

/// Host surface for transient notices.
pub trait Notifier {
    /// Shows a transient notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the notice could not be delivered.
    fn show_notice(&self, message: &str) -> Result<(), NotificationError>;
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn show_notice(&self, message: &str) -> Result<(), NotificationError> {
        (**self).show_notice(message)
    }
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Notices shown so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MockNotifier {
    fn show_notice(&self, message: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
        Ok(())
    }
}

//! Terminal presentation of the timer.
//!
//! This module provides:
//! - Pure formatting of the clock, progress and status text
//! - The `PomodoroView` panel that drives an engine from user input
//! - Parsing of input lines into `UserAction`s

mod action;
mod panel;

pub use action::{ActionParseError, UserAction, HELP_TEXT};
pub use panel::{spawn_stdin_reader, Flow, PomodoroView, SETTINGS_POLL_PERIOD};

use crate::media::to_embed_url;
use crate::types::{TimerPhase, TimerSnapshot};

/// Shown in the music region when no link is configured.
pub const MEDIA_PLACEHOLDER: &str = "Configure YouTube playlist URL in settings";

/// Width of the progress bar in cells.
pub const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Formatting
// ============================================================================

/// Formats seconds as `MM:SS`. Minutes are not capped at 99.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed share of the phase in percent, clamped to 0–100.
///
/// A zero-length phase counts as complete.
pub fn progress_percent(total_seconds: u32, remaining_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 100.0;
    }
    let elapsed = f64::from(total_seconds) - f64::from(remaining_seconds);
    (elapsed / f64::from(total_seconds) * 100.0).clamp(0.0, 100.0)
}

/// Status text for the current phase. Sessions are numbered from 1.
pub fn status_label(snapshot: &TimerSnapshot) -> String {
    match snapshot.phase {
        TimerPhase::Work => format!("Work Session {}", snapshot.session_count + 1),
        TimerPhase::Break if snapshot.long_break => "Long Break".to_string(),
        TimerPhase::Break => "Break Time".to_string(),
    }
}

/// Label of the start/pause control.
pub fn toggle_label(active: bool) -> &'static str {
    if active {
        "Pause"
    } else {
        "Start"
    }
}

/// Renders `percent` as a bar of `width` cells.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Text of the music region for a configured link.
pub fn media_line(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        MEDIA_PLACEHOLDER.to_string()
    } else {
        format!("Playing: {}", to_embed_url(url))
    }
}

// ============================================================================
// ViewModel
// ============================================================================

/// Everything the timer line shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub clock: String,
    pub progress: f64,
    pub status: String,
    pub toggle: &'static str,
}

impl ViewModel {
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        Self {
            clock: format_clock(snapshot.remaining_seconds),
            progress: progress_percent(snapshot.total_seconds, snapshot.remaining_seconds),
            status: status_label(snapshot),
            toggle: toggle_label(snapshot.active),
        }
    }

    /// The single line patched on every tick.
    pub fn timer_line(&self) -> String {
        format!(
            "{}  {} {:>3.0}%  {}  [{}]",
            self.clock,
            progress_bar(self.progress, PROGRESS_WIDTH),
            self.progress.floor(),
            self.status,
            self.toggle
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

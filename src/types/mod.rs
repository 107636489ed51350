//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and in-memory timer state
//! - Phase duration derivation (short vs. long break)
//! - Snapshots handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
///
/// A long break is not a separate phase; it is derived from the session
/// count whenever a break duration is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Currently in a work session
    #[default]
    Work,
    /// Currently in a break (short or long)
    Break,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Work => "work",
            TimerPhase::Break => "break",
        }
    }

    /// Returns true for the break phase.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerPhase::Break)
    }
}

// ============================================================================
// Phase duration
// ============================================================================

/// Returns true if a break following `session_count` completed work sessions
/// is a long break.
pub fn is_long_break(session_count: u32, settings: &Settings) -> bool {
    let divisor = settings.sessions_until_long_break.max(1);
    session_count > 0 && session_count % divisor == 0
}

/// Returns the full length of `phase` in seconds.
///
/// This is the only place the long-break rule is applied. Both the phase
/// transition and the progress total go through it.
pub fn phase_duration(phase: TimerPhase, session_count: u32, settings: &Settings) -> u32 {
    let minutes = match phase {
        TimerPhase::Work => settings.work_duration,
        TimerPhase::Break if is_long_break(session_count, settings) => {
            settings.long_break_duration
        }
        TimerPhase::Break => settings.break_duration,
    };
    minutes.saturating_mul(60)
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub active: bool,
    /// Number of completed work sessions
    pub session_count: u32,
}

impl TimerState {
    /// Creates a paused state at the start of the first work session.
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: TimerPhase::Work,
            remaining_seconds: phase_duration(TimerPhase::Work, 0, settings),
            active: false,
            session_count: 0,
        }
    }

    /// Full length of the current phase in seconds.
    pub fn total_seconds(&self, settings: &Settings) -> u32 {
        phase_duration(self.phase, self.session_count, settings)
    }

    /// Returns true if the current phase is a long break.
    pub fn is_long_break(&self, settings: &Settings) -> bool {
        self.phase.is_break() && is_long_break(self.session_count, settings)
    }

    /// Restores the countdown to the full length of the current phase.
    pub fn restore(&mut self, settings: &Settings) {
        self.remaining_seconds = self.total_seconds(settings);
    }

    /// Records a completed work session and moves to the break.
    pub fn finish_work(&mut self, settings: &Settings) {
        self.session_count += 1;
        self.phase = TimerPhase::Break;
        self.restore(settings);
    }

    /// Ends the break and moves to the next work session.
    pub fn finish_break(&mut self, settings: &Settings) {
        self.phase = TimerPhase::Work;
        self.restore(settings);
    }

    /// Decrements the timer by one second.
    ///
    /// Returns true if the timer has reached 0.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Plain copy of the timer state plus derived values, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    /// Full length of the current phase in seconds
    pub total_seconds: u32,
    pub active: bool,
    pub session_count: u32,
    /// True while in a long break
    pub long_break: bool,
}

impl TimerSnapshot {
    /// Captures the state against the given settings.
    pub fn capture(state: &TimerState, settings: &Settings) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            total_seconds: state.total_seconds(settings),
            active: state.active,
            session_count: state.session_count,
            long_break: state.is_long_break(settings),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    // ------------------------------------------------------------------------
    // TimerPhase Tests
    // ------------------------------------------------------------------------

    mod timer_phase_tests {
        use super::*;

        #[test]
        fn test_default_is_work() {
            assert_eq!(TimerPhase::default(), TimerPhase::Work);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(TimerPhase::Work.as_str(), "work");
            assert_eq!(TimerPhase::Break.as_str(), "break");
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&TimerPhase::Break).unwrap();
            assert_eq!(json, "\"break\"");
        }
    }

    // ------------------------------------------------------------------------
    // Phase Duration Tests
    // ------------------------------------------------------------------------

    mod phase_duration_tests {
        use super::*;

        #[test]
        fn test_work_duration_ignores_session_count() {
            let settings = settings();
            for count in [0, 3, 4, 8] {
                assert_eq!(phase_duration(TimerPhase::Work, count, &settings), 25 * 60);
            }
        }

        #[test]
        fn test_no_long_break_before_first_session() {
            assert!(!is_long_break(0, &settings()));
        }

        #[test]
        fn test_long_break_at_multiples() {
            let settings = settings();
            for count in [4, 8, 12] {
                assert!(is_long_break(count, &settings), "count {}", count);
                assert_eq!(phase_duration(TimerPhase::Break, count, &settings), 15 * 60);
            }
        }

        #[test]
        fn test_short_break_elsewhere() {
            let settings = settings();
            for count in [1, 2, 3, 5, 6, 7, 9] {
                assert!(!is_long_break(count, &settings), "count {}", count);
                assert_eq!(phase_duration(TimerPhase::Break, count, &settings), 5 * 60);
            }
        }

        #[test]
        fn test_zero_divisor_is_treated_as_one() {
            let settings = Settings {
                sessions_until_long_break: 0,
                ..Settings::default()
            };
            assert!(is_long_break(1, &settings));
            assert!(is_long_break(2, &settings));
            assert!(!is_long_break(0, &settings));
        }

        #[test]
        fn test_huge_duration_saturates() {
            let settings = Settings {
                work_duration: u32::MAX,
                ..Settings::default()
            };
            assert_eq!(phase_duration(TimerPhase::Work, 0, &settings), u32::MAX);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = TimerState::new(&settings());

            assert_eq!(state.phase, TimerPhase::Work);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert!(!state.active);
            assert_eq!(state.session_count, 0);
        }

        #[test]
        fn test_tick() {
            let mut state = TimerState::new(&settings());
            state.remaining_seconds = 2;

            assert!(!state.tick());
            assert_eq!(state.remaining_seconds, 1);

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_tick_at_zero_stays_at_zero() {
            let mut state = TimerState::new(&settings());
            state.remaining_seconds = 0;

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_finish_work_short_break() {
            let settings = settings();
            let mut state = TimerState::new(&settings);

            state.finish_work(&settings);

            assert_eq!(state.phase, TimerPhase::Break);
            assert_eq!(state.session_count, 1);
            assert_eq!(state.remaining_seconds, 5 * 60);
            assert!(!state.is_long_break(&settings));
        }

        #[test]
        fn test_finish_work_long_break() {
            let settings = settings();
            let mut state = TimerState::new(&settings);
            state.session_count = 3;

            state.finish_work(&settings);

            assert_eq!(state.session_count, 4);
            assert_eq!(state.remaining_seconds, 15 * 60);
            assert!(state.is_long_break(&settings));
        }

        #[test]
        fn test_finish_break_returns_to_work() {
            let settings = settings();
            let mut state = TimerState::new(&settings);
            state.session_count = 3;
            state.finish_work(&settings);

            state.finish_break(&settings);

            assert_eq!(state.phase, TimerPhase::Work);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert_eq!(state.session_count, 4);
            assert!(!state.is_long_break(&settings));
        }

        #[test]
        fn test_restore_keeps_phase_and_count() {
            let settings = settings();
            let mut state = TimerState::new(&settings);
            state.finish_work(&settings);
            state.remaining_seconds = 12;

            state.restore(&settings);

            assert_eq!(state.phase, TimerPhase::Break);
            assert_eq!(state.session_count, 1);
            assert_eq!(state.remaining_seconds, 5 * 60);
        }

        #[test]
        fn test_total_seconds_follows_settings() {
            let mut settings = settings();
            let state = TimerState::new(&settings);

            settings.work_duration = 50;

            assert_eq!(state.total_seconds(&settings), 50 * 60);
        }
    }

    // ------------------------------------------------------------------------
    // TimerSnapshot Tests
    // ------------------------------------------------------------------------

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_capture_work() {
            let settings = settings();
            let mut state = TimerState::new(&settings);
            state.remaining_seconds = 100;
            state.active = true;

            let snapshot = TimerSnapshot::capture(&state, &settings);

            assert_eq!(snapshot.phase, TimerPhase::Work);
            assert_eq!(snapshot.remaining_seconds, 100);
            assert_eq!(snapshot.total_seconds, 25 * 60);
            assert!(snapshot.active);
            assert!(!snapshot.long_break);
        }

        #[test]
        fn test_capture_long_break() {
            let settings = settings();
            let mut state = TimerState::new(&settings);
            state.session_count = 7;
            state.finish_work(&settings);

            let snapshot = TimerSnapshot::capture(&state, &settings);

            assert!(snapshot.long_break);
            assert_eq!(snapshot.total_seconds, 15 * 60);
            assert_eq!(snapshot.session_count, 8);
        }
    }
}

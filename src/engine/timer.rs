//! Timer engine for the Pomodoro timer.
//!
//! This module provides the core timer functionality:
//! - Start, pause, toggle and reset of the countdown
//! - One-second ticks from a cancellable ticker task
//! - Completion effects (audio cue and notice) and phase transitions
//! - Deferred auto-start of the next phase

use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::ticker::ScheduledTask;
use crate::notification::{completion_notice, Notifier};
use crate::settings::SettingsHandle;
use crate::sound::SoundPlayer;
use crate::types::{TimerPhase, TimerSnapshot, TimerState};

/// Interval between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Delay before the next phase starts on its own.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// EngineCommand
// ============================================================================

/// Messages from scheduled tasks back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// One second elapsed on the ticker of the given generation
    Tick { generation: u64 },
    /// The deferred start of the given generation is due
    AutoStart { generation: u64 },
}

// ============================================================================
// Completion
// ============================================================================

/// Record of a finished phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Phase that just ended
    pub finished: TimerPhase,
    /// Phase the timer moved to
    pub next: TimerPhase,
    /// Completed work sessions after the transition
    pub session_count: u32,
    /// Whether the next phase is a long break
    pub long_break: bool,
    /// Notice text, if one was shown
    pub notice: Option<&'static str>,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown state and its scheduled tasks.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Settings, re-read on every use
    settings: SettingsHandle,
    sound: Box<dyn SoundPlayer>,
    notifier: Box<dyn Notifier>,
    /// Sender cloned into every scheduled task
    command_tx: mpsc::UnboundedSender<EngineCommand>,
    /// Running ticker, present exactly while active
    ticker: Option<ScheduledTask>,
    /// Deferred start waiting to fire
    pending_start: Option<ScheduledTask>,
    next_generation: u64,
}

impl TimerEngine {
    /// Creates a paused engine at the start of the first work session.
    ///
    /// The returned receiver yields the commands scheduled tasks send; pass
    /// each one to [`TimerEngine::handle`].
    pub fn new(
        settings: SettingsHandle,
        sound: Box<dyn SoundPlayer>,
        notifier: Box<dyn Notifier>,
    ) -> (Self, mpsc::UnboundedReceiver<EngineCommand>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let state = TimerState::new(&settings.current());
        let engine = Self {
            state,
            settings,
            sound,
            notifier,
            command_tx,
            ticker: None,
            pending_start: None,
            next_generation: 0,
        };
        (engine, command_rx)
    }

    /// Starts the countdown. Does nothing if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.pending_start = None;
        if self.state.active {
            return;
        }

        let generation = self.bump_generation();
        self.state.active = true;
        self.ticker = Some(ScheduledTask::every(
            generation,
            TICK_PERIOD,
            self.command_tx.clone(),
        ));
        debug!(
            "Timer started: {} with {}s remaining",
            self.state.phase.as_str(),
            self.state.remaining_seconds
        );
    }

    /// Pauses the countdown. Does nothing if not running.
    pub fn pause(&mut self) {
        self.pending_start = None;
        if !self.state.active {
            return;
        }

        self.state.active = false;
        self.ticker = None;
        debug!(
            "Timer paused with {}s remaining",
            self.state.remaining_seconds
        );
    }

    /// Pauses when running, starts otherwise.
    pub fn toggle(&mut self) {
        if self.state.active {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Pauses and restores the full length of the current phase.
    ///
    /// The phase and session count are kept.
    pub fn reset(&mut self) {
        self.pause();
        self.state.restore(&self.settings.current());
        debug!(
            "Timer reset: {} with {}s remaining",
            self.state.phase.as_str(),
            self.state.remaining_seconds
        );
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing while paused. When the countdown reaches 0 the phase is
    /// completed before this returns.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.state.active {
            return None;
        }

        if self.state.tick() {
            Some(self.complete())
        } else {
            None
        }
    }

    /// Handles a command from a scheduled task.
    ///
    /// Commands from a cancelled task are ignored.
    pub fn handle(&mut self, command: EngineCommand) -> Option<Completion> {
        match command {
            EngineCommand::Tick { generation } => {
                if self.ticker.as_ref().map(ScheduledTask::generation) != Some(generation) {
                    debug!("Ignoring stale tick from generation {}", generation);
                    return None;
                }
                self.tick()
            }
            EngineCommand::AutoStart { generation } => {
                if self.pending_start.as_ref().map(ScheduledTask::generation)
                    != Some(generation)
                {
                    debug!("Ignoring cancelled auto-start {}", generation);
                    return None;
                }
                self.pending_start = None;
                self.start();
                None
            }
        }
    }

    /// Ends the current phase and moves to the next one.
    fn complete(&mut self) -> Completion {
        self.pause();
        let settings = self.settings.current();
        let finished = self.state.phase;

        if let Err(e) = self.sound.play_cue() {
            warn!("Failed to play completion cue: {} ({})", e, e.suggestion());
        }

        let notice = if settings.enable_notifications {
            let message = completion_notice(finished);
            if let Err(e) = self.notifier.show_notice(message) {
                warn!("Failed to show notice: {} ({})", e, e.suggestion());
            }
            Some(message)
        } else {
            None
        };

        match finished {
            TimerPhase::Work => self.state.finish_work(&settings),
            TimerPhase::Break => self.state.finish_break(&settings),
        }

        if settings.auto_start_breaks {
            let generation = self.bump_generation();
            self.pending_start = Some(ScheduledTask::after(
                generation,
                AUTO_START_DELAY,
                self.command_tx.clone(),
            ));
        }

        let completion = Completion {
            finished,
            next: self.state.phase,
            session_count: self.state.session_count,
            long_break: self.state.is_long_break(&settings),
            notice,
        };
        info!(
            "{} finished, next {} ({} sessions completed)",
            completion.finished.as_str(),
            completion.next.as_str(),
            completion.session_count
        );
        completion
    }

    /// Returns a snapshot of the state for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::capture(&self.state, &self.settings.current())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns true while a deferred start is waiting.
    #[cfg(test)]
    pub fn has_pending_start(&self) -> bool {
        self.pending_start.is_some()
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    /// Cancels every scheduled task and releases the audio output.
    pub fn shutdown(&mut self) {
        self.pending_start = None;
        self.ticker = None;
        self.state.active = false;
        self.sound.release();
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

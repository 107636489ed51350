//! Sound playback for the Pomodoro timer.
//!
//! This module provides the completion cue:
//!
//! - A synthesized three-tone chime (no audio assets)
//! - Non-blocking playback on detached sinks
//! - Lazy device access, released when the view closes
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Engine-facing interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ RodioSoundPlayer │────▶│  cue_tones()     │
//! │  (lazy output)   │     │  C5 / E5 / G5    │
//! └──────────────────┘     └──────────────────┘
//! ```

mod cue;
mod error;
mod player;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub use cue::{
    cue_tones, Tone, CUE_FREQUENCIES, TONE_ATTACK, TONE_GAIN, TONE_LENGTH, TONE_SPACING,
};
pub use error::SoundError;
pub use player::RodioSoundPlayer;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays the completion cue.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play_cue(&self) -> Result<(), SoundError>;

    /// Releases any audio resource held by the player.
    fn release(&self);
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play_cue(&self) -> Result<(), SoundError> {
        (**self).play_cue()
    }

    fn release(&self) {
        (**self).release()
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    cue_count: AtomicUsize,
    release_count: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of cues requested, including failed ones.
    #[must_use]
    pub fn cue_count(&self) -> usize {
        self.cue_count.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_cue(&self) -> Result<(), SoundError> {
        self.cue_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("Mock failure".to_string()));
        }
        Ok(())
    }

    fn release(&self) {
        self.release_count.fetch_add(1, Ordering::SeqCst);
    }
}

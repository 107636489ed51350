//! Sound player implementation using rodio.
//!
//! The output stream is opened on the first cue and kept until `release`.
//! Each tone plays on its own detached sink, so playback never blocks the
//! caller.

use std::cell::RefCell;

use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::cue::cue_tones;
use super::error::SoundError;
use super::SoundPlayer;

/// An open audio output. Dropping it stops every sink created on it.
struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    fn open() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        debug!("Audio output stream initialized");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

/// A sound player that uses rodio for audio playback.
///
/// The rodio output stream is tied to the thread that opened it, so this
/// player is neither `Send` nor `Sync`.
pub struct RodioSoundPlayer {
    output: RefCell<Option<AudioOutput>>,
    /// Whether sound playback is disabled.
    disabled: bool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player without touching the audio hardware.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self {
            output: RefCell::new(None),
            disabled,
        }
    }

    /// Returns true if sound playback is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns true while the output stream is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.output.borrow().is_some()
    }

    /// Plays the three-tone cue.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device cannot be opened or a sink
    /// cannot be created.
    pub fn play_cue(&self) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let mut slot = self.output.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioOutput::open()?);
        }
        let Some(output) = slot.as_ref() else {
            return Err(SoundError::PlaybackError("audio output closed".to_string()));
        };

        for tone in cue_tones() {
            let sink =
                Sink::try_new(&output.handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
            sink.append(tone.source());
            sink.detach(); // Non-blocking: sound continues after function returns
        }

        debug!("Completion cue started (detached)");
        Ok(())
    }

    /// Closes the output stream if it is open.
    pub fn release(&self) {
        if self.output.borrow_mut().take().is_some() {
            debug!("Audio output stream released");
        }
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_cue(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::play_cue(self)
    }

    fn release(&self) {
        RodioSoundPlayer::release(self)
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.is_disabled())
            .field("open", &self.is_open())
            .finish()
    }
}

//! The three-tone completion cue.
//!
//! A rising C major triad: C5, E5 and G5, each tone starting 200 ms after the
//! previous one and lasting 300 ms.

use rodio::source::SineWave;
use rodio::Source;
use std::time::Duration;

/// Tone frequencies in Hz, in playing order.
pub const CUE_FREQUENCIES: [f32; 3] = [523.25, 659.25, 783.99];

/// Offset between consecutive tone starts.
pub const TONE_SPACING: Duration = Duration::from_millis(200);

/// Length of each tone.
pub const TONE_LENGTH: Duration = Duration::from_millis(300);

/// Ramp from silence to full gain.
pub const TONE_ATTACK: Duration = Duration::from_millis(50);

/// Peak amplitude of each tone.
pub const TONE_GAIN: f32 = 0.3;

/// One tone of the cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Start time relative to the first tone
    pub offset: Duration,
}

impl Tone {
    /// Builds the audio source for this tone, padded with leading silence
    /// up to its offset.
    pub fn source(&self) -> impl Source<Item = f32> + Send + 'static {
        let mut tone = SineWave::new(self.frequency)
            .amplify(TONE_GAIN)
            .fade_in(TONE_ATTACK)
            .take_duration(TONE_LENGTH);
        tone.set_filter_fadeout();
        tone.delay(self.offset)
    }
}

/// Returns the tones of the cue in playing order.
pub fn cue_tones() -> [Tone; 3] {
    let mut offset = Duration::ZERO;
    CUE_FREQUENCIES.map(|frequency| {
        let tone = Tone { frequency, offset };
        offset += TONE_SPACING;
        tone
    })
}

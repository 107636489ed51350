//! Pomodoro Productivity Library
//!
//! This library provides the core functionality for the Pomodoro Productivity CLI.
//! It includes:
//! - Timer engine for work/break cycling with session counting
//! - Settings with lenient loading and background persistence
//! - Terminal view that renders the timer and relays user actions
//! - Sound playback for the completion chime
//! - Desktop notices on phase completion
//! - Embed URL conversion for background music links
//! - CLI command parsing and display utilities

pub mod cli;
pub mod engine;
pub mod media;
pub mod notification;
pub mod settings;
pub mod sound;
pub mod types;
pub mod view;

// Re-export commonly used types for convenience
pub use types::{is_long_break, phase_duration, TimerPhase, TimerSnapshot, TimerState};

// Re-export engine types
pub use engine::{Completion, EngineCommand, TimerEngine};

// Re-export settings types
pub use settings::{SettingField, Settings, SettingsError, SettingsHandle, SettingsStore};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer};

// Re-export notification types
pub use notification::{DesktopNotifier, MockNotifier, NotificationError, Notifier};

// Re-export presentation types
pub use media::{to_embed_url, MediaEmbed};
pub use view::{PomodoroView, UserAction};

//! User settings for the Pomodoro timer.
//!
//! Settings are persisted as a JSON blob with camelCase keys. Loading merges
//! whatever the file holds over the defaults field by field, so a partial or
//! tampered file never prevents the timer from starting.
//!
//! - `field`: settings panel fields and input rules
//! - `store`: in-process store with fire-and-forget persistence
//! - `error`: settings error types

mod error;
mod field;
mod store;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub use error::SettingsError;
pub use field::{parse_leading_int, parse_toggle, SettingField};
pub use store::{SettingsHandle, SettingsStore};

/// Default work duration in minutes.
pub const DEFAULT_WORK_DURATION: u32 = 25;
/// Default short break duration in minutes.
pub const DEFAULT_BREAK_DURATION: u32 = 5;
/// Default long break duration in minutes.
pub const DEFAULT_LONG_BREAK_DURATION: u32 = 15;
/// Default number of work sessions before a long break.
pub const DEFAULT_SESSIONS_UNTIL_LONG_BREAK: u32 = 4;

// ============================================================================
// Settings
// ============================================================================

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Work session length in minutes
    pub work_duration: u32,
    /// Short break length in minutes
    pub break_duration: u32,
    /// Long break length in minutes
    pub long_break_duration: u32,
    /// Completed work sessions that trigger a long break
    pub sessions_until_long_break: u32,
    /// Start the next phase automatically after a completion
    pub auto_start_breaks: bool,
    /// Show a notice when a phase completes
    pub enable_notifications: bool,
    /// Playlist or video link for background music
    #[serde(alias = "youtubePlaylistUrl")]
    pub media_playlist_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: DEFAULT_WORK_DURATION,
            break_duration: DEFAULT_BREAK_DURATION,
            long_break_duration: DEFAULT_LONG_BREAK_DURATION,
            sessions_until_long_break: DEFAULT_SESSIONS_UNTIL_LONG_BREAK,
            auto_start_breaks: false,
            enable_notifications: true,
            media_playlist_url: String::new(),
        }
    }
}

impl Settings {
    /// Sets the work duration.
    pub fn with_work_duration(mut self, minutes: u32) -> Self {
        self.work_duration = minutes;
        self
    }

    /// Sets the short break duration.
    pub fn with_break_duration(mut self, minutes: u32) -> Self {
        self.break_duration = minutes;
        self
    }

    /// Sets the long break duration.
    pub fn with_long_break_duration(mut self, minutes: u32) -> Self {
        self.long_break_duration = minutes;
        self
    }

    /// Sets the number of sessions before a long break.
    pub fn with_sessions_until_long_break(mut self, sessions: u32) -> Self {
        self.sessions_until_long_break = sessions;
        self
    }

    /// Sets auto-start.
    pub fn with_auto_start_breaks(mut self, enabled: bool) -> Self {
        self.auto_start_breaks = enabled;
        self
    }

    /// Sets completion notices.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.enable_notifications = enabled;
        self
    }

    /// Restores the positive-value invariants.
    ///
    /// Zero durations fall back to their defaults; a zero session divisor is
    /// clamped to 1.
    pub fn sanitized(mut self) -> Self {
        self.work_duration = positive_or(self.work_duration, DEFAULT_WORK_DURATION);
        self.break_duration = positive_or(self.break_duration, DEFAULT_BREAK_DURATION);
        self.long_break_duration =
            positive_or(self.long_break_duration, DEFAULT_LONG_BREAK_DURATION);
        self.sessions_until_long_break = self.sessions_until_long_break.max(1);
        self
    }

    /// Parses a persisted blob, merging it over the defaults.
    ///
    /// Malformed JSON yields the defaults.
    pub fn from_json_str(content: &str) -> Self {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => Self::merged_over_defaults(&value),
            Err(e) => {
                warn!("Settings file is not valid JSON, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Merges a JSON value over the defaults.
    ///
    /// Each field is read independently. Values of the wrong type or out of
    /// range are replaced by the default for that field.
    pub fn merged_over_defaults(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(map) = value.as_object() else {
            debug!("Settings blob is not an object, using defaults");
            return defaults;
        };

        Self {
            work_duration: minutes_field(map, SettingField::WorkDuration)
                .unwrap_or(defaults.work_duration),
            break_duration: minutes_field(map, SettingField::BreakDuration)
                .unwrap_or(defaults.break_duration),
            long_break_duration: minutes_field(map, SettingField::LongBreakDuration)
                .unwrap_or(defaults.long_break_duration),
            sessions_until_long_break: integer_field(map, SettingField::SessionsUntilLongBreak)
                .map(|n| u32::try_from(n.max(1)).unwrap_or(u32::MAX))
                .unwrap_or(defaults.sessions_until_long_break),
            auto_start_breaks: bool_field(map, SettingField::AutoStartBreaks)
                .unwrap_or(defaults.auto_start_breaks),
            enable_notifications: bool_field(map, SettingField::EnableNotifications)
                .unwrap_or(defaults.enable_notifications),
            media_playlist_url: string_field(map, SettingField::MediaPlaylistUrl)
                .unwrap_or(defaults.media_playlist_url),
        }
    }

    /// Applies raw panel input to one field.
    ///
    /// Duration and count fields follow the panel rule: the leading integer
    /// is used, and anything non-numeric, zero or negative falls back to the
    /// field default.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidToggle` if a toggle field receives
    /// something other than an on/off value.
    pub fn apply_input(&mut self, field: SettingField, input: &str) -> Result<(), SettingsError> {
        match field {
            SettingField::WorkDuration => self.work_duration = field.parse_count(input),
            SettingField::BreakDuration => self.break_duration = field.parse_count(input),
            SettingField::LongBreakDuration => {
                self.long_break_duration = field.parse_count(input)
            }
            SettingField::SessionsUntilLongBreak => {
                self.sessions_until_long_break = field.parse_count(input)
            }
            SettingField::AutoStartBreaks => self.auto_start_breaks = field.parse_flag(input)?,
            SettingField::EnableNotifications => {
                self.enable_notifications = field.parse_flag(input)?
            }
            SettingField::MediaPlaylistUrl => self.media_playlist_url = input.trim().to_string(),
        }
        Ok(())
    }

    /// Returns the value of one field formatted for display.
    pub fn display_value(&self, field: SettingField) -> String {
        let on_off = |enabled: bool| if enabled { "on" } else { "off" }.to_string();
        match field {
            SettingField::WorkDuration => format!("{} min", self.work_duration),
            SettingField::BreakDuration => format!("{} min", self.break_duration),
            SettingField::LongBreakDuration => format!("{} min", self.long_break_duration),
            SettingField::SessionsUntilLongBreak => self.sessions_until_long_break.to_string(),
            SettingField::AutoStartBreaks => on_off(self.auto_start_breaks),
            SettingField::EnableNotifications => on_off(self.enable_notifications),
            SettingField::MediaPlaylistUrl if self.media_playlist_url.is_empty() => {
                "(not set)".to_string()
            }
            SettingField::MediaPlaylistUrl => self.media_playlist_url.clone(),
        }
    }
}

fn positive_or(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, field: SettingField) -> Option<&'a Value> {
    map.get(field.key())
        .or_else(|| field.legacy_key().and_then(|key| map.get(key)))
}

fn integer_field(map: &Map<String, Value>, field: SettingField) -> Option<i64> {
    match lookup(map, field)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        other => {
            debug!("Ignoring non-numeric {}: {}", field.key(), other);
            None
        }
    }
}

fn minutes_field(map: &Map<String, Value>, field: SettingField) -> Option<u32> {
    integer_field(map, field)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|minutes| *minutes > 0)
}

fn bool_field(map: &Map<String, Value>, field: SettingField) -> Option<bool> {
    lookup(map, field)?.as_bool()
}

fn string_field(map: &Map<String, Value>, field: SettingField) -> Option<String> {
    lookup(map, field)?.as_str().map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================

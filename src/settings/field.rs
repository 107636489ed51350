//! Settings panel fields.
//!
//! Each persisted setting is addressable by a kebab-case name on the command
//! line and carries the label, description and placeholder the panel shows.

use clap::ValueEnum;

use super::{
    SettingsError, DEFAULT_BREAK_DURATION, DEFAULT_LONG_BREAK_DURATION,
    DEFAULT_SESSIONS_UNTIL_LONG_BREAK, DEFAULT_WORK_DURATION,
};

/// A single editable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SettingField {
    WorkDuration,
    BreakDuration,
    LongBreakDuration,
    SessionsUntilLongBreak,
    AutoStartBreaks,
    EnableNotifications,
    MediaPlaylistUrl,
}

impl SettingField {
    /// All fields in panel order.
    pub const ALL: [SettingField; 7] = [
        SettingField::WorkDuration,
        SettingField::BreakDuration,
        SettingField::LongBreakDuration,
        SettingField::SessionsUntilLongBreak,
        SettingField::AutoStartBreaks,
        SettingField::EnableNotifications,
        SettingField::MediaPlaylistUrl,
    ];

    /// JSON key in the persisted blob.
    pub fn key(&self) -> &'static str {
        match self {
            Self::WorkDuration => "workDuration",
            Self::BreakDuration => "breakDuration",
            Self::LongBreakDuration => "longBreakDuration",
            Self::SessionsUntilLongBreak => "sessionsUntilLongBreak",
            Self::AutoStartBreaks => "autoStartBreaks",
            Self::EnableNotifications => "enableNotifications",
            Self::MediaPlaylistUrl => "mediaPlaylistUrl",
        }
    }

    /// Older key still accepted when loading.
    pub fn legacy_key(&self) -> Option<&'static str> {
        match self {
            Self::MediaPlaylistUrl => Some("youtubePlaylistUrl"),
            _ => None,
        }
    }

    /// Command-line name.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::WorkDuration => "work-duration",
            Self::BreakDuration => "break-duration",
            Self::LongBreakDuration => "long-break-duration",
            Self::SessionsUntilLongBreak => "sessions-until-long-break",
            Self::AutoStartBreaks => "auto-start-breaks",
            Self::EnableNotifications => "enable-notifications",
            Self::MediaPlaylistUrl => "media-playlist-url",
        }
    }

    /// Label shown in the settings panel.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WorkDuration => "Work duration",
            Self::BreakDuration => "Break duration",
            Self::LongBreakDuration => "Long break duration",
            Self::SessionsUntilLongBreak => "Sessions until long break",
            Self::AutoStartBreaks => "Auto-start breaks",
            Self::EnableNotifications => "Enable notifications",
            Self::MediaPlaylistUrl => "YouTube playlist URL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::WorkDuration => "Duration of work sessions in minutes",
            Self::BreakDuration => "Duration of short breaks in minutes",
            Self::LongBreakDuration => "Duration of long breaks in minutes",
            Self::SessionsUntilLongBreak => "Number of work sessions before a long break",
            Self::AutoStartBreaks => "Automatically start the next session when one ends",
            Self::EnableNotifications => "Show a notice when a session ends",
            Self::MediaPlaylistUrl => "Playlist or video to play while you work",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::WorkDuration => "25",
            Self::BreakDuration => "5",
            Self::LongBreakDuration => "15",
            Self::SessionsUntilLongBreak => "4",
            Self::AutoStartBreaks | Self::EnableNotifications => "on|off",
            Self::MediaPlaylistUrl => "https://www.youtube.com/playlist?list=...",
        }
    }

    /// Default for numeric fields, `None` for the rest.
    pub fn default_count(&self) -> Option<u32> {
        match self {
            Self::WorkDuration => Some(DEFAULT_WORK_DURATION),
            Self::BreakDuration => Some(DEFAULT_BREAK_DURATION),
            Self::LongBreakDuration => Some(DEFAULT_LONG_BREAK_DURATION),
            Self::SessionsUntilLongBreak => Some(DEFAULT_SESSIONS_UNTIL_LONG_BREAK),
            _ => None,
        }
    }

    /// Returns true for on/off fields.
    pub fn is_toggle(&self) -> bool {
        matches!(self, Self::AutoStartBreaks | Self::EnableNotifications)
    }

    /// Parses numeric panel input, falling back to the field default.
    pub(crate) fn parse_count(&self, input: &str) -> u32 {
        let default = self.default_count().unwrap_or(1);
        match parse_leading_int(input) {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => default,
        }
    }

    pub(crate) fn parse_flag(&self, input: &str) -> Result<bool, SettingsError> {
        parse_toggle(input).ok_or_else(|| SettingsError::InvalidToggle {
            field: self.cli_name(),
            value: input.to_string(),
        })
    }
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// Reads the leading integer of `input`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` if no digit follows.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses an on/off value.
pub fn parse_toggle(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

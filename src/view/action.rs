//! User actions typed into the timer view.

use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::settings::SettingField;

/// Help line listing every input the view accepts.
pub const HELP_TEXT: &str = "Enter: start/pause | r: reset | m <url>: update music | \
                             set <setting> <value>: change a setting | h: help | q: quit";

/// An action requested from the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Start when paused, pause when running
    Toggle,
    Start,
    Pause,
    /// Restore the full length of the current phase
    Reset,
    /// Replace the background music link; empty clears it
    UpdateMediaUrl(String),
    /// Apply panel input to one setting
    Set { field: SettingField, value: String },
    Help,
    /// Close the view
    Quit,
}

/// Error for an input line that names no action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("unknown command '{0}', type 'h' for help")]
    UnknownCommand(String),

    #[error("unknown setting '{0}', expected one of: {names}", names = setting_names())]
    UnknownSetting(String),
}

fn setting_names() -> String {
    SettingField::ALL
        .iter()
        .map(|field| field.cli_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for UserAction {
    type Err = ActionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let action = match word.to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" => Self::Toggle,
            "s" | "start" => Self::Start,
            "p" | "pause" => Self::Pause,
            "r" | "reset" => Self::Reset,
            "m" | "music" => return Ok(Self::UpdateMediaUrl(rest.to_string())),
            "set" => return parse_set(line, rest),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(ActionParseError::UnknownCommand(line.to_string())),
        };

        if rest.is_empty() {
            Ok(action)
        } else {
            Err(ActionParseError::UnknownCommand(line.to_string()))
        }
    }
}

/// Parses `<setting> <value>`; the value may be empty.
fn parse_set(line: &str, rest: &str) -> Result<UserAction, ActionParseError> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err(ActionParseError::UnknownCommand(line.to_string()));
    }

    let field = SettingField::from_str(name, true)
        .map_err(|_| ActionParseError::UnknownSetting(name.to_string()))?;
    Ok(UserAction::Set {
        field,
        value: value.to_string(),
    })
}

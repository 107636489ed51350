//! Display utilities for the Pomodoro Productivity CLI.
//!
//! This module provides formatted output for:
//! - Settings listings
//! - Confirmation messages
//! - Error messages

use std::path::Path;

use crate::settings::{SettingField, Settings};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats every setting as an aligned table.
    ///
    /// Each row shows the label, the current value, what the setting does
    /// and an example input.
    pub fn settings_table(settings: &Settings) -> String {
        let width = SettingField::ALL
            .iter()
            .map(|field| field.name().len())
            .max()
            .unwrap_or(0);

        let values: Vec<String> = SettingField::ALL
            .iter()
            .map(|field| settings.display_value(*field))
            .collect();
        let value_width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

        let mut table = String::new();
        table.push_str("Pomodoro Productivity settings\n");
        table.push_str("─────────────────────────────\n");
        for (field, value) in SettingField::ALL.iter().zip(&values) {
            table.push_str(&format!(
                "{:<width$}  {:<value_width$}  {} (e.g. {})\n",
                field.name(),
                value,
                field.description(),
                field.placeholder(),
                width = width,
                value_width = value_width
            ));
        }
        table
    }

    /// Shows every setting and the file they come from.
    pub fn show_settings(settings: &Settings, path: &Path) {
        print!("{}", Self::settings_table(settings));
        println!("File: {}", path.display());
    }

    /// Formats the confirmation for a changed setting.
    pub fn setting_updated(field: SettingField, settings: &Settings) -> String {
        format!("* {} set to {}", field.name(), settings.display_value(field))
    }

    /// Shows a confirmation for a changed setting.
    pub fn show_setting_updated(field: SettingField, settings: &Settings) {
        println!("{}", Self::setting_updated(field, settings));
    }

    /// Shows a confirmation for restored defaults.
    pub fn show_settings_reset(path: &Path) {
        println!("* Settings restored to defaults");
        println!("  File: {}", path.display());
    }

    /// Shows the embed URL for a media link.
    pub fn show_embed(url: &str) {
        println!("{}", url);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

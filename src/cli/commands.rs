//! Command definitions for the Pomodoro Productivity CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::SettingField;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Productivity - a terminal Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-productivity",
    version,
    about = "Terminal Pomodoro timer with work/break cycling and background music links",
    long_about = "A Pomodoro timer for the terminal.\n\
                  Alternates work sessions and breaks, takes a long break after a configurable\n\
                  number of sessions, and plays a short chime when each phase ends.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the Pomodoro view in this terminal
    Open(OpenArgs),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Print the embed URL for a YouTube playlist or video link
    Embed {
        /// Playlist or video link
        url: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for the open command
#[derive(Args, Debug, Clone, Default)]
pub struct OpenArgs {
    /// Disable the completion chime
    #[arg(long)]
    pub no_sound: bool,
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Print every setting
    Show,

    /// Change one setting
    Set {
        /// Setting to change
        #[arg(value_enum)]
        field: SettingField,

        /// New value (minutes, a count, on/off, or a link)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Restore the default settings
    Reset,
}

// ============================================================================
// Tests
// ============================================================================

//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while editing or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be written.
    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A toggle field received an unrecognized value.
    #[error("invalid value for {field}: '{value}' (expected on/off, true/false, yes/no or 1/0)")]
    InvalidToggle { field: &'static str, value: String },

    /// No platform configuration directory could be determined.
    #[error("could not determine the configuration directory; pass --config")]
    ConfigDirNotFound,
}

impl SettingsError {
    /// Returns true if this error came from the filesystem.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

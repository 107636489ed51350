//! In-process settings store.
//!
//! The store owns the current settings in a `watch` channel. Readers hold a
//! [`SettingsHandle`] and see every update on their next read. Updates made
//! through [`SettingsStore::update`] are persisted by a single writer task, so
//! rapid edits coalesce and the file always ends at the last value.
//!
//! Other processes may commit to the same file. Before each edit the store
//! rereads the file and adopts an outside change, unless one of its own
//! saves is still pending.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Settings, SettingsError};

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "pomodoro-productivity";

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

// ============================================================================
// SettingsHandle
// ============================================================================

/// Read side of the store.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    rx: watch::Receiver<Settings>,
}

impl SettingsHandle {
    /// Returns the latest settings.
    pub fn current(&self) -> Settings {
        self.rx.borrow().clone()
    }

    /// Creates a handle that always reads `settings`.
    pub fn fixed(settings: Settings) -> Self {
        let (_tx, rx) = watch::channel(settings.sanitized());
        Self { rx }
    }
}

// ============================================================================
// Synced
// ============================================================================

/// What the store last read from or wrote to its file.
#[derive(Debug)]
struct Synced {
    /// Raw file content, `None` if the file was absent or unreadable
    text: Option<String>,
    /// Settings that content stands for
    settings: Settings,
}

type SharedSynced = Arc<Mutex<Synced>>;

fn lock(synced: &SharedSynced) -> std::sync::MutexGuard<'_, Synced> {
    synced.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Owner of the current settings and their file.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    tx: watch::Sender<Settings>,
    synced: SharedSynced,
    writer: Option<JoinHandle<()>>,
}

impl SettingsStore {
    /// Returns `<config_dir>/pomodoro-productivity/settings.json`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::ConfigDirNotFound` if the platform has no
    /// configuration directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .ok_or(SettingsError::ConfigDirNotFound)
    }

    /// Creates a store holding `settings` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self::with_synced(path.into(), None, settings.sanitized())
    }

    fn with_synced(path: PathBuf, text: Option<String>, settings: Settings) -> Self {
        let (tx, _rx) = watch::channel(settings.clone());
        Self {
            path,
            tx,
            synced: Arc::new(Mutex::new(Synced { text, settings })),
            writer: None,
        }
    }

    /// Loads settings from `path`, merging stored values over the defaults.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let text = read_settings_text(&path).await;
        let settings = text
            .as_deref()
            .map(Settings::from_json_str)
            .unwrap_or_default();
        Self::with_synced(path, text, settings)
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the latest settings.
    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Returns a read handle that follows every update.
    pub fn handle(&self) -> SettingsHandle {
        SettingsHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Adopts settings another process committed to the file.
    ///
    /// Nothing happens while one of this store's saves is pending or when
    /// the file is unchanged since it was last read or written. Returns true
    /// if the settings changed.
    pub async fn refresh(&mut self) -> bool {
        if self.current() != lock(&self.synced).settings {
            debug!("Settings save pending, skipping reload");
            return false;
        }

        let text = read_settings_text(&self.path).await;
        let settings = {
            let mut synced = lock(&self.synced);
            if synced.text == text {
                return false;
            }
            let Some(content) = text.as_deref() else {
                // Removed from outside; keep the values in memory.
                synced.text = None;
                return false;
            };
            let settings = Settings::from_json_str(content);
            *synced = Synced {
                text,
                settings: settings.clone(),
            };
            settings
        };

        info!("Reloaded settings changed in {}", self.path.display());
        self.tx.send_replace(settings);
        true
    }

    /// Edits the settings and schedules a save.
    ///
    /// Outside changes to the file are adopted first. The new value is
    /// visible to every handle immediately. The save runs in the background;
    /// failures are logged.
    pub async fn update(&mut self, edit: impl FnOnce(&mut Settings)) -> Settings {
        self.refresh().await;
        let mut settings = self.current();
        edit(&mut settings);
        self.publish(settings)
    }

    /// Like [`update`](Self::update) for edits that can fail.
    ///
    /// # Errors
    ///
    /// Returns the edit's error; the settings are left unchanged.
    pub async fn try_update(
        &mut self,
        edit: impl FnOnce(&mut Settings) -> Result<(), SettingsError>,
    ) -> Result<Settings, SettingsError> {
        self.refresh().await;
        let mut settings = self.current();
        edit(&mut settings)?;
        Ok(self.publish(settings))
    }

    fn publish(&mut self, settings: Settings) -> Settings {
        let settings = settings.sanitized();
        self.ensure_writer();
        self.tx.send_replace(settings.clone());
        settings
    }

    /// Replaces the settings and writes them before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn commit(&self, settings: Settings) -> Result<Settings, SettingsError> {
        let settings = settings.sanitized();
        let text = write_settings(&self.path, &settings).await?;
        *lock(&self.synced) = Synced {
            text: Some(text),
            settings: settings.clone(),
        };
        self.tx.send_replace(settings.clone());
        Ok(settings)
    }

    /// Stops the writer after it has saved the last update.
    pub async fn close(self) {
        let Self { tx, writer, .. } = self;
        drop(tx);
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                warn!("Settings writer ended abnormally: {}", e);
            }
        }
    }

    fn ensure_writer(&mut self) {
        if self.writer.is_some() {
            return;
        }

        // Subscribing marks the current value as seen; only later updates are written.
        let mut rx = self.tx.subscribe();
        let path = self.path.clone();
        let synced = Arc::clone(&self.synced);
        self.writer = Some(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let settings = rx.borrow_and_update().clone();
                if lock(&synced).settings == settings {
                    continue;
                }
                match write_settings(&path, &settings).await {
                    Ok(text) => {
                        *lock(&synced) = Synced {
                            text: Some(text),
                            settings,
                        };
                        debug!("Settings saved to {}", path.display());
                    }
                    Err(e) => warn!("{}", e),
                }
            }
        }));
    }
}

/// Reads the raw settings file, `None` if it is missing or unreadable.
async fn read_settings_text(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No settings file at {}, using defaults", path.display());
            None
        }
        Err(e) => {
            warn!(
                "Failed to read settings from {}, using defaults: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Writes `settings` as pretty JSON, creating parent directories.
///
/// Returns the written content.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails.
pub async fn write_settings(path: &Path, settings: &Settings) -> Result<String, SettingsError> {
    let content = serde_json::to_string_pretty(settings)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SettingsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, &content)
        .await
        .map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content)
}

// ============================================================================
// Tests
// ============================================================================

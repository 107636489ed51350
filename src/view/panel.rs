//! The interactive timer panel.
//!
//! The first render writes the whole panel. Every later render patches the
//! timer line in place, which is always the line the cursor sits on.
//!
//! Settings saved by another process are picked up before each action and
//! on a short poll.

use std::future::Future;
use std::io::{self, BufRead, Write};

use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::{media_line, UserAction, ViewModel, HELP_TEXT};
use crate::cli::Display;
use crate::engine::{EngineCommand, TimerEngine};
use crate::notification::Notifier;
use crate::settings::{SettingField, SettingsStore};
use crate::sound::SoundPlayer;

/// Title of the panel.
pub const VIEW_TITLE: &str = "Pomodoro Productivity";

/// Carriage return plus clear-line.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// How often the settings file is checked for outside changes.
pub const SETTINGS_POLL_PERIOD: Duration = Duration::from_secs(2);

/// Whether the view keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal panel that owns an engine and the settings store.
pub struct PomodoroView<W: Write> {
    engine: TimerEngine,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    store: SettingsStore,
    out: W,
    rendered: bool,
}

impl<W: Write> PomodoroView<W> {
    /// Creates the view with a fresh engine reading from `store`.
    pub fn new(
        store: SettingsStore,
        sound: Box<dyn SoundPlayer>,
        notifier: Box<dyn Notifier>,
        out: W,
    ) -> Self {
        let (engine, commands) = TimerEngine::new(store.handle(), sound, notifier);
        Self {
            engine,
            commands,
            store,
            out,
            rendered: false,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Returns the output written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Renders the panel, or patches the timer line after the first call.
    pub fn render(&mut self) -> io::Result<()> {
        if self.rendered {
            self.write_timer_line()?;
        } else {
            self.render_full()?;
            self.rendered = true;
        }
        self.out.flush()
    }

    fn render_full(&mut self) -> io::Result<()> {
        let url = self.store.current().media_playlist_url;
        writeln!(self.out, "{}", VIEW_TITLE)?;
        writeln!(self.out, "─────────────────────────────")?;
        writeln!(self.out, "Background Music")?;
        writeln!(self.out, "  {}", media_line(&url))?;
        writeln!(self.out, "{}", HELP_TEXT)?;
        writeln!(self.out)?;
        self.write_timer_line()
    }

    fn write_timer_line(&mut self) -> io::Result<()> {
        let line = ViewModel::from_snapshot(&self.engine.snapshot()).timer_line();
        write!(self.out, "{}{}", CLEAR_LINE, line)
    }

    /// Writes `message` above the timer line and redraws the timer line.
    fn write_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", CLEAR_LINE, message)?;
        if self.rendered {
            self.render()
        } else {
            self.out.flush()
        }
    }

    /// Re-renders the music region after a link change.
    pub fn render_media(&mut self) -> io::Result<()> {
        let url = self.store.current().media_playlist_url;
        self.write_message(&format!("Background Music: {}", media_line(&url)))
    }

    /// Adopts settings saved elsewhere and redraws what they affect.
    pub async fn reload_settings(&mut self) -> io::Result<()> {
        let before = self.store.current().media_playlist_url;
        if !self.store.refresh().await {
            return Ok(());
        }

        if self.store.current().media_playlist_url != before {
            self.render_media()
        } else if self.rendered {
            self.render()
        } else {
            Ok(())
        }
    }

    /// Applies one user action.
    pub async fn apply(&mut self, action: UserAction) -> io::Result<Flow> {
        debug!("Applying {:?}", action);
        self.reload_settings().await?;

        match action {
            UserAction::Toggle => self.engine.toggle(),
            UserAction::Start => self.engine.start(),
            UserAction::Pause => self.engine.pause(),
            UserAction::Reset => self.engine.reset(),
            UserAction::UpdateMediaUrl(url) => {
                self.store
                    .update(|settings| settings.media_playlist_url = url)
                    .await;
                self.render_media()?;
                return Ok(Flow::Continue);
            }
            UserAction::Set { field, value } => {
                let message = match self
                    .store
                    .try_update(|settings| settings.apply_input(field, &value))
                    .await
                {
                    Ok(settings) => Display::setting_updated(field, &settings),
                    Err(e) => e.to_string(),
                };
                self.write_message(&message)?;
                if field == SettingField::MediaPlaylistUrl {
                    self.render_media()?;
                }
                return Ok(Flow::Continue);
            }
            UserAction::Help => {
                self.write_message(HELP_TEXT)?;
                return Ok(Flow::Continue);
            }
            UserAction::Quit => return Ok(Flow::Quit),
        }
        self.render()?;
        Ok(Flow::Continue)
    }

    /// Parses and applies one input line. Unknown input prints a hint.
    pub async fn submit(&mut self, line: &str) -> io::Result<Flow> {
        match line.parse::<UserAction>() {
            Ok(action) => self.apply(action).await,
            Err(e) => {
                self.write_message(&e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Passes a scheduled command to the engine and re-renders.
    pub fn handle_command(&mut self, command: EngineCommand) -> io::Result<()> {
        if let Some(completion) = self.engine.handle(command) {
            if let Some(notice) = completion.notice {
                writeln!(self.out, "{}{}", CLEAR_LINE, notice)?;
            }
        }
        self.render()
    }

    /// Runs the view until quit, end of input or `shutdown` resolves.
    pub async fn run_until<F>(
        &mut self,
        input: &mut mpsc::UnboundedReceiver<String>,
        shutdown: F,
    ) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.render()?;

        let mut poll = interval_at(Instant::now() + SETTINGS_POLL_PERIOD, SETTINGS_POLL_PERIOD);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("Shutdown requested");
                    break;
                }
                Some(command) = self.commands.recv() => {
                    self.handle_command(command)?;
                }
                _ = poll.tick() => {
                    self.reload_settings().await?;
                }
                line = input.recv() => match line {
                    Some(line) => {
                        if self.submit(&line).await? == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        debug!("Input closed");
                        break;
                    }
                },
            }
        }
        Ok(())
    }

    /// Runs the view until quit, end of input or Ctrl-C.
    pub async fn run(&mut self, input: &mut mpsc::UnboundedReceiver<String>) -> io::Result<()> {
        self.run_until(input, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Tears the view down and flushes pending settings.
    ///
    /// Returns the writer.
    pub async fn close(self) -> io::Result<W> {
        let Self {
            mut engine,
            store,
            mut out,
            rendered,
            ..
        } = self;

        engine.shutdown();
        drop(engine);
        store.close().await;

        if rendered {
            writeln!(out)?;
            out.flush()?;
        }
        Ok(out)
    }
}

/// Reads stdin lines on a dedicated thread.
///
/// The channel closes at end of input.
pub fn spawn_stdin_reader() -> io::Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!("Stopped reading input: {}", e);
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

// ============================================================================
// Tests
// ============================================================================

//! Pomodoro Productivity - a terminal Pomodoro timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 work sessions

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro_productivity::cli::{Cli, Commands, Display, OpenArgs, SettingsCommand};
use pomodoro_productivity::media::to_embed_url;
use pomodoro_productivity::notification::DesktopNotifier;
use pomodoro_productivity::settings::{Settings, SettingsStore};
use pomodoro_productivity::sound::RodioSoundPlayer;
use pomodoro_productivity::view::{spawn_stdin_reader, PomodoroView};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so the timer view on stdout stays intact.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Open(args)) => {
            open_view(settings_path(cli.config)?, &args).await?;
        }
        Some(Commands::Settings(command)) => {
            run_settings(settings_path(cli.config)?, command).await?;
        }
        Some(Commands::Embed { url }) => {
            Display::show_embed(&to_embed_url(&url));
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Resolves the settings file from `--config` or the platform default.
fn settings_path(config: Option<PathBuf>) -> Result<PathBuf> {
    match config {
        Some(path) => Ok(path),
        None => SettingsStore::default_path().context("Failed to locate the settings file"),
    }
}

/// Opens the interactive timer view until the user quits.
async fn open_view(path: PathBuf, args: &OpenArgs) -> Result<()> {
    let store = SettingsStore::load(path).await;
    let sound = RodioSoundPlayer::new(args.no_sound);
    let mut view = PomodoroView::new(
        store,
        Box::new(sound),
        Box::new(DesktopNotifier::new()),
        io::stdout(),
    );

    let mut input = spawn_stdin_reader().context("Failed to read terminal input")?;
    let result = view.run(&mut input).await;
    view.close().await.context("Failed to close the timer view")?;
    result.context("Failed to draw the timer view")
}

/// Runs a settings subcommand.
async fn run_settings(path: PathBuf, command: SettingsCommand) -> Result<()> {
    let store = SettingsStore::load(path).await;

    match command {
        SettingsCommand::Show => {
            Display::show_settings(&store.current(), store.path());
        }
        SettingsCommand::Set { field, value } => {
            let mut settings = store.current();
            settings.apply_input(field, &value)?;
            let saved = store.commit(settings).await?;
            Display::show_setting_updated(field, &saved);
        }
        SettingsCommand::Reset => {
            store.commit(Settings::default()).await?;
            Display::show_settings_reset(store.path());
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

//! End-to-end tests for the timer engine.
//!
//! These run the engine against its real ticker on a paused tokio clock:
//! - Complete work/break cycles with long breaks
//! - Stale ticks after pause and restart
//! - Deferred auto-start and its cancellation
//! - Completion effects and their failures

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use pomodoro_productivity::engine::{Completion, EngineCommand, TimerEngine};
use pomodoro_productivity::notification::{
    MockNotifier, BREAK_COMPLETE_NOTICE, WORK_COMPLETE_NOTICE,
};
use pomodoro_productivity::settings::{Settings, SettingsHandle, SettingsStore};
use pomodoro_productivity::sound::MockSoundPlayer;
use pomodoro_productivity::types::TimerPhase;

// ============================================================================
// Test Helpers
// ============================================================================

struct Harness {
    engine: TimerEngine,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    sound: Arc<MockSoundPlayer>,
    notifier: Arc<MockNotifier>,
}

/// Creates an engine with short durations: 1 minute work, 1 minute break,
/// 2 minute long break every 4 sessions.
fn create_fast_settings() -> Settings {
    Settings::default()
        .with_work_duration(1)
        .with_break_duration(1)
        .with_long_break_duration(2)
        .with_sessions_until_long_break(4)
}

fn create_engine_with_handle(settings: SettingsHandle) -> Harness {
    let sound = Arc::new(MockSoundPlayer::new());
    let notifier = Arc::new(MockNotifier::new());
    let (engine, commands) = TimerEngine::new(
        settings,
        Box::new(Arc::clone(&sound)),
        Box::new(Arc::clone(&notifier)),
    );
    Harness {
        engine,
        commands,
        sound,
        notifier,
    }
}

fn create_engine(settings: Settings) -> Harness {
    create_engine_with_handle(SettingsHandle::fixed(settings))
}

/// Feeds scheduled commands to the engine until a phase completes.
async fn run_to_completion(harness: &mut Harness) -> Completion {
    loop {
        let command = harness
            .commands
            .recv()
            .await
            .expect("engine keeps its command sender");
        if let Some(completion) = harness.engine.handle(command) {
            return completion;
        }
    }
}

// ============================================================================
// Full Cycles
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fresh_engine_state() {
    let harness = create_engine(Settings::default());
    let state = harness.engine.state();

    assert_eq!(state.phase, TimerPhase::Work);
    assert_eq!(state.remaining_seconds, 25 * 60);
    assert!(!state.active);
    assert_eq!(state.session_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_long_breaks_every_fourth_session() {
    let mut harness = create_engine(create_fast_settings());

    for session in 1..=12u32 {
        harness.engine.start();
        let work = run_to_completion(&mut harness).await;

        assert_eq!(work.finished, TimerPhase::Work);
        assert_eq!(work.session_count, session);
        let expected_long = session % 4 == 0;
        assert_eq!(work.long_break, expected_long, "session {}", session);
        let expected_break = if expected_long { 120 } else { 60 };
        assert_eq!(harness.engine.state().remaining_seconds, expected_break);
        assert!(!harness.engine.state().active);

        harness.engine.start();
        let rest = run_to_completion(&mut harness).await;

        assert_eq!(rest.finished, TimerPhase::Break);
        assert_eq!(rest.next, TimerPhase::Work);
        assert_eq!(harness.engine.state().remaining_seconds, 60);
        assert_eq!(harness.engine.state().session_count, session);
    }

    assert_eq!(harness.sound.cue_count(), 24);
}

#[tokio::test(start_paused = true)]
async fn test_notices_alternate() {
    let mut harness = create_engine(create_fast_settings());

    harness.engine.start();
    run_to_completion(&mut harness).await;
    harness.engine.start();
    run_to_completion(&mut harness).await;

    assert_eq!(
        harness.notifier.messages(),
        vec![WORK_COMPLETE_NOTICE, BREAK_COMPLETE_NOTICE]
    );
}

#[tokio::test(start_paused = true)]
async fn test_completion_takes_one_second_per_tick() {
    let mut harness = create_engine(create_fast_settings());
    let started = tokio::time::Instant::now();

    harness.engine.start();
    run_to_completion(&mut harness).await;

    assert_eq!(started.elapsed(), Duration::from_secs(60));
}

// ============================================================================
// Pause, Reset and Stale Ticks
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_stops_countdown() {
    let mut harness = create_engine(Settings::default());
    harness.engine.start();

    for _ in 0..5 {
        let command = harness.commands.recv().await.unwrap();
        harness.engine.handle(command);
    }
    harness.engine.pause();
    sleep(Duration::from_secs(10)).await;
    while let Ok(command) = harness.commands.try_recv() {
        harness.engine.handle(command);
    }

    assert_eq!(harness.engine.state().remaining_seconds, 25 * 60 - 5);
}

#[tokio::test(start_paused = true)]
async fn test_queued_tick_from_old_ticker_is_ignored() {
    let mut harness = create_engine(Settings::default());

    harness.engine.start();
    sleep(Duration::from_millis(1500)).await;
    harness.engine.pause();
    harness.engine.start();

    let stale = harness.commands.recv().await.unwrap();
    assert!(harness.engine.handle(stale).is_none());
    assert_eq!(harness.engine.state().remaining_seconds, 25 * 60);

    let fresh = harness.commands.recv().await.unwrap();
    harness.engine.handle(fresh);
    assert_eq!(harness.engine.state().remaining_seconds, 25 * 60 - 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_in_break_keeps_session_count() {
    let mut harness = create_engine(create_fast_settings());
    harness.engine.start();
    run_to_completion(&mut harness).await;
    harness.engine.start();
    for _ in 0..10 {
        let command = harness.commands.recv().await.unwrap();
        harness.engine.handle(command);
    }

    harness.engine.reset();

    let state = harness.engine.state();
    assert_eq!(state.phase, TimerPhase::Break);
    assert_eq!(state.session_count, 1);
    assert_eq!(state.remaining_seconds, 60);
    assert!(!state.active);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_twice_leaves_time_unchanged() {
    let mut harness = create_engine(Settings::default());

    harness.engine.toggle();
    harness.engine.toggle();
    sleep(Duration::from_secs(3)).await;
    while let Ok(command) = harness.commands.try_recv() {
        harness.engine.handle(command);
    }

    assert_eq!(harness.engine.state().remaining_seconds, 25 * 60);
}

// ============================================================================
// Auto-start
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_auto_start_runs_through_cycle() {
    let mut harness = create_engine(create_fast_settings().with_auto_start_breaks(true));
    harness.engine.start();

    let work = run_to_completion(&mut harness).await;
    assert_eq!(work.next, TimerPhase::Break);
    assert!(!harness.engine.state().active);

    let rest = run_to_completion(&mut harness).await;
    assert_eq!(rest.next, TimerPhase::Work);

    let started = tokio::time::Instant::now();
    let command = harness.commands.recv().await.unwrap();
    assert!(matches!(command, EngineCommand::AutoStart { .. }));
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    harness.engine.handle(command);
    assert!(harness.engine.state().active);
}

#[tokio::test(start_paused = true)]
async fn test_pause_cancels_deferred_start() {
    let mut harness = create_engine(create_fast_settings().with_auto_start_breaks(true));
    harness.engine.start();
    run_to_completion(&mut harness).await;

    harness.engine.pause();
    sleep(Duration::from_secs(3)).await;

    assert!(harness.commands.try_recv().is_err());
    assert!(!harness.engine.state().active);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_deferred_start() {
    let mut harness = create_engine(create_fast_settings().with_auto_start_breaks(true));
    harness.engine.start();
    run_to_completion(&mut harness).await;

    harness.engine.shutdown();
    sleep(Duration::from_secs(3)).await;

    assert!(harness.commands.try_recv().is_err());
    assert_eq!(harness.sound.release_count(), 1);
}

// ============================================================================
// Effects
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_effect_failures_do_not_block_cycle() {
    let mut harness = create_engine(create_fast_settings());
    harness.sound.set_should_fail(true);
    harness.notifier.set_should_fail(true);

    harness.engine.start();
    let work = run_to_completion(&mut harness).await;
    harness.engine.start();
    let rest = run_to_completion(&mut harness).await;

    assert_eq!(work.next, TimerPhase::Break);
    assert_eq!(rest.next, TimerPhase::Work);
    assert_eq!(harness.engine.state().session_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_notices_disabled_still_plays_cue() {
    let mut harness = create_engine(create_fast_settings().with_notifications(false));

    harness.engine.start();
    let work = run_to_completion(&mut harness).await;

    assert!(work.notice.is_none());
    assert!(harness.notifier.messages().is_empty());
    assert_eq!(harness.sound.cue_count(), 1);
}

// ============================================================================
// Live Settings
// ============================================================================

#[tokio::test]
async fn test_settings_change_applies_on_reset() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SettingsStore::new(dir.path().join("settings.json"), Settings::default());
    let mut harness = create_engine_with_handle(store.handle());

    store.update(|settings| settings.work_duration = 40).await;

    assert_eq!(harness.engine.state().remaining_seconds, 25 * 60);
    assert_eq!(harness.engine.snapshot().total_seconds, 40 * 60);

    harness.engine.reset();
    assert_eq!(harness.engine.state().remaining_seconds, 40 * 60);

    store.close().await;
}

//! Cancellable scheduled tasks that feed the engine's command channel.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, MissedTickBehavior};

use super::EngineCommand;

/// A spawned task tagged with the generation it was scheduled under.
///
/// The task is aborted when this handle is dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Sends `Tick` every `period`, starting one period from now.
    pub fn every(
        generation: u64,
        period: Duration,
        tx: mpsc::UnboundedSender<EngineCommand>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(EngineCommand::Tick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    /// Sends `AutoStart` once after `delay`.
    pub fn after(
        generation: u64,
        delay: Duration,
        tx: mpsc::UnboundedSender<EngineCommand>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(EngineCommand::AutoStart { generation });
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true once the task has run to completion or been aborted.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_every_first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = ScheduledTask::every(3, Duration::from_secs(1), tx);

        sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().unwrap(), EngineCommand::Tick { generation: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_keeps_ticking() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = ScheduledTask::every(1, Duration::from_secs(1), tx);

        sleep(Duration::from_millis(3500)).await;

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::every(1, Duration::from_secs(1), tx);

        sleep(Duration::from_millis(1500)).await;
        drop(task);
        while rx.try_recv().is_ok() {}

        sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::after(7, Duration::from_secs(1), tx);
        assert_eq!(task.generation(), 7);

        sleep(Duration::from_secs(3)).await;

        assert_eq!(
            rx.try_recv().unwrap(),
            EngineCommand::AutoStart { generation: 7 }
        );
        assert!(rx.try_recv().is_err());
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_dropped_before_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::after(1, Duration::from_secs(1), tx);

        drop(task);
        sleep(Duration::from_secs(2)).await;

        assert!(rx.try_recv().is_err());
    }
}

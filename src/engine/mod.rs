//! Countdown engine.
//!
//! - `timer`: the `TimerEngine` state machine and its completion effects
//! - `ticker`: cancellable tasks that schedule ticks and deferred starts

mod ticker;
mod timer;

pub use ticker::ScheduledTask;
pub use timer::{Completion, EngineCommand, TimerEngine, AUTO_START_DELAY, TICK_PERIOD};

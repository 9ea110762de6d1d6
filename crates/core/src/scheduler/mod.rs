//! Randomized posting schedule.
//!
//! The `Scheduler` owns a single timer. Each time it fires the timer is
//! re-armed with a fresh random delay before the cycle runs, so a failing or
//! slow cycle never stops the bot from scheduling the next one. Cycles run
//! one at a time.

mod config;
mod runner;

pub use config::SchedulerConfig;
pub use runner::{next_delay, Scheduler};

use async_trait::async_trait;

use crate::relay::CycleOutcome;

/// Work executed each time the schedule fires.
#[async_trait]
pub trait Cycle: Send + Sync {
    async fn run(&self) -> CycleOutcome;
}

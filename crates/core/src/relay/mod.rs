//! One relay cycle: fetch, select, remember, format, publish.

mod config;
mod runner;
mod types;

pub use config::RelayConfig;
pub use runner::RelayCycle;
pub use types::{CycleOutcome, CycleStage};

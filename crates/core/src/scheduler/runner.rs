//! Scheduler implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use rand::Rng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{error, info, warn};

use crate::config::MAX_INTERVAL_MINUTES;
use crate::relay::CycleOutcome;

use super::config::SchedulerConfig;
use super::Cycle;

/// Draw a delay uniformly from `[min_minutes, max_minutes]`.
///
/// Bounds are clamped to `[0, MAX_INTERVAL_MINUTES]` (NaN counts as 0), so
/// any input yields a finite delay.
pub fn next_delay<R: Rng + ?Sized>(min_minutes: f64, max_minutes: f64, rng: &mut R) -> Duration {
    let min = clamp_minutes(min_minutes);
    let max = clamp_minutes(max_minutes);
    let minutes = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    Duration::try_from_secs_f64(minutes * 60.0).unwrap_or(Duration::ZERO)
}

fn clamp_minutes(minutes: f64) -> f64 {
    if minutes.is_nan() {
        0.0
    } else {
        minutes.clamp(0.0, MAX_INTERVAL_MINUTES)
    }
}

/// Drives a `Cycle` on a randomized timer.
pub struct Scheduler {
    config: SchedulerConfig,
    cycle: Arc<dyn Cycle>,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, cycle: Arc<dyn Cycle>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            cycle,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            task: Mutex::new(None),
        }
    }

    /// Start the scheduler (spawns the timer loop).
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Scheduler already running");
            return;
        }

        let handle = tokio::spawn(run_loop(
            self.config.clone(),
            Arc::clone(&self.cycle),
            self.shutdown_tx.subscribe(),
        ));

        match self.task.lock() {
            Ok(mut task) => *task = Some(handle),
            Err(poisoned) => *poisoned.into_inner() = Some(handle),
        }
    }

    /// Stop the scheduler. A cycle in progress is allowed to finish.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Scheduler not running");
            return;
        }

        info!("Stopping scheduler");
        let _ = self.shutdown_tx.send(());

        let handle = match self.task.lock() {
            Ok(mut task) => task.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Scheduler task ended abnormally: {}", e);
            }
        }

        info!("Scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

async fn run_loop(
    config: SchedulerConfig,
    cycle: Arc<dyn Cycle>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let first_delay = if config.post_on_start {
        Duration::ZERO
    } else {
        let delay = draw_delay(&config);
        log_next_post(delay);
        delay
    };

    // The one timer of this scheduler; re-armed in place on every fire.
    let timer = sleep(first_delay);
    tokio::pin!(timer);

    loop {
        // Shutdown wins over an already elapsed timer.
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            _ = &mut timer => {}
        }

        let delay = draw_delay(&config);
        timer.as_mut().reset(Instant::now() + delay);
        log_next_post(delay);

        match cycle.run().await {
            CycleOutcome::Published { id, status_id } => {
                info!(id = %id, status_id = %status_id, "Cycle complete");
            }
            outcome => info!("Cycle ended: {}", outcome),
        }
    }
}

fn draw_delay(config: &SchedulerConfig) -> Duration {
    next_delay(
        config.interval_min_minutes,
        config.interval_max_minutes,
        &mut rand::thread_rng(),
    )
}

fn log_next_post(delay: Duration) {
    let at = TimeDelta::from_std(delay)
        .ok()
        .and_then(|d| Utc::now().checked_add_signed(d))
        .map(|at| at.to_rfc3339())
        .unwrap_or_default();
    info!(at = %at, "Next post scheduled in {} minutes", delay.as_secs() / 60);
}

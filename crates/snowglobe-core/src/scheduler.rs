//! Fixed-interval tick scheduler.
//!
//! [`TickScheduler::spawn`] starts a background task that runs one update
//! per wall-clock interval against a shared village. Missed intervals are
//! skipped, never replayed. The task stops on [`SchedulerHandle::stop`] or
//! when the handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::tick::{self, TickSummary, VillageState};

/// The live village shared between the scheduler and its readers.
pub type SharedVillage = Arc<RwLock<VillageState>>;

/// Errors that can occur when starting the scheduler.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The tick interval must be non-zero.
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to broadcast tick summaries to observers.
/// The callback runs while the write lock on the village is held.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &VillageState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &VillageState) {}
}

/// Spawns the tick task.
pub struct TickScheduler;

impl TickScheduler {
    /// Start ticking `village` every `interval`.
    ///
    /// The first update fires one full interval after the call. Each fire
    /// takes the write lock, runs the update on the latest state, replaces
    /// it, and then notifies `callback`. A failed update stops the task.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ZeroInterval`] for a zero interval.
    pub fn spawn<R>(
        village: SharedVillage,
        mut rng: R,
        interval: Duration,
        mut callback: Box<dyn TickCallback>,
    ) -> Result<SchedulerHandle, SchedulerError>
    where
        R: Rng + Send + 'static,
    {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;

            info!(interval_ms = interval.as_millis(), "Tick scheduler started");
            loop {
                ticker.tick().await;
                let mut state = village.write().await;
                match tick::advance(&state, &mut rng) {
                    Ok((next, summary)) => {
                        *state = next;
                        callback.on_tick(&summary, &state);
                    }
                    Err(e) => {
                        error!(error = %e, "Tick failed, scheduler stopping");
                        break;
                    }
                }
            }
        });

        Ok(SchedulerHandle {
            task,
            stopped: false,
        })
    }
}

/// Owner of a running scheduler task.
#[derive(Debug)]
pub struct SchedulerHandle {
    task: JoinHandle<()>,
    stopped: bool,
}

impl SchedulerHandle {
    /// Stop ticking. No further updates run after this returns.
    pub fn stop(&mut self) {
        if !self.stopped {
            self.task.abort();
            self.stopped = true;
            info!("Tick scheduler stopped");
        }
    }

    /// Whether the task is still ticking.
    pub fn is_running(&self) -> bool {
        !self.stopped && !self.task.is_finished()
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! The expiration sweeper: a cancellable background task.

use crate::Coordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument};

/// Periodically retires expired posts through the coordinator's deletion
/// path, attributed to the system rather than any requester.
///
/// Fire-and-forget: the loop produces no return value, only side effects
/// and best-effort audit notifications. The task is owned through its
/// [`SweeperHandle`] so shutdown can drain it deterministically instead of
/// leaking a timer.
pub struct Sweeper {
    coordinator: Arc<Coordinator>,
    interval: Duration,
}

impl Sweeper {
    /// Create a sweeper with an explicit scan interval.
    pub fn new(coordinator: Arc<Coordinator>, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
        }
    }

    /// Create a sweeper using the interval from the coordinator's
    /// configuration.
    pub fn from_config(coordinator: Arc<Coordinator>) -> Self {
        let interval = coordinator.config().sweep_interval();
        Self::new(coordinator, interval)
    }

    /// Spawn the sweep loop onto the runtime.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    #[instrument(skip(self, shutdown), fields(interval_secs = self.interval.as_secs()))]
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("expiration sweeper started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are already logged per post inside the pass;
                    // an error here means the expiry query itself failed.
                    if let Err(e) = self.coordinator.sweep_once().await {
                        error!(error = %e, "sweep pass failed");
                    }
                }
                _ = shutdown.changed() => {
                    info!("expiration sweeper shutting down");
                    break;
                }
            }
        }
    }
}

/// Handle owning the spawned sweep loop.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop to stop and wait for it to finish its current pass.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "sweeper task ended abnormally");
        }
    }
}

//! Expired Session Sweeper
//!
//! A background task, owned by the process, that periodically deletes
//! sessions nobody redeemed.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::application::session_store::SessionStore;
use crate::domain::repository::SessionRepository;

/// Handle to a running sweeper. Dropping it without [`SweeperHandle::shutdown`]
/// leaves the task running until the runtime stops.
pub struct SweeperHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the loop and wait for an in-flight sweep to finish
    pub async fn shutdown(self) {
        // Err means the task already exited
        let _ = self.shutdown_tx.send(());

        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Session sweeper task panicked");
        } else {
            tracing::info!("Session sweeper stopped");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct SessionSweeper;

impl SessionSweeper {
    /// Start sweeping every `period`. The first sweep runs one period from now.
    pub fn spawn<S>(store: SessionStore<S>, period: Duration) -> SweeperHandle
    where
        S: SessionRepository + Send + Sync + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(period_secs = period.as_secs(), "Session sweeper started");

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        // Failures wait for the next tick
                        if let Err(e) = store.sweep_expired().await {
                            tracing::warn!(error = %e, "Session sweep failed, retrying next tick");
                        }
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx, task }
    }
}

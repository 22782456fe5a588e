//! Process-wide scheduling of the probe and rotation cycles.

use crate::rotator::Rotator;
use crate::worker::Worker;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::info;

/// Owns the two periodic cycle tasks.
///
/// Created at process init, torn down at shutdown; there are no ambient
/// global timers. The cycles run on independent timers and are not
/// synchronized to each other.
pub struct Supervisor {
    probe_task: JoinHandle<()>,
    rotation_task: JoinHandle<()>,
}

impl Supervisor {
    /// Start both cycles.
    ///
    /// Each fires once immediately, then at its fixed interval measured from
    /// the previous fire. The cycle body is spawned as its own task, so work
    /// that outlives the interval never delays the next fire; overlap is
    /// tolerated because per-check and per-log operations are keyed by id.
    pub fn start(
        worker: Worker,
        rotator: Rotator,
        probe_interval: Duration,
        rotation_interval: Duration,
    ) -> Self {
        let probe_task = tokio::spawn(async move {
            let mut timer = interval(probe_interval);
            loop {
                timer.tick().await;
                let worker = worker.clone();
                tokio::spawn(async move {
                    worker.run_cycle().await;
                });
            }
        });

        let rotation_task = tokio::spawn(async move {
            let mut timer = interval(rotation_interval);
            loop {
                timer.tick().await;
                let rotator = rotator.clone();
                tokio::spawn(async move {
                    rotator.run_cycle().await;
                });
            }
        });

        info!(
            probe_interval_s = probe_interval.as_secs(),
            rotation_interval_s = rotation_interval.as_secs(),
            "Supervisor started"
        );

        Self {
            probe_task,
            rotation_task,
        }
    }

    /// Abort both cycle tasks. In-flight cycle work is not interrupted.
    pub fn shutdown(&self) {
        self.probe_task.abort();
        self.rotation_task.abort();
        info!("Supervisor stopped");
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.probe_task.abort();
        self.rotation_task.abort();
    }
}

//! The probe cycle: enumerate, validate, probe and process every check.

use crate::alert::AlertDispatcher;
use crate::logs::LogStore;
use crate::store::{CHECKS, RecordStore};
use crate::types::{AuditRecord, Check, CheckState, epoch_millis};
use crate::validate;
use probe::{Outcome, ProbeExecutor};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs the per-check pipelines for one probe cycle.
#[derive(Clone)]
pub struct Worker {
    store: Arc<dyn RecordStore>,
    executor: Arc<ProbeExecutor>,
    dispatcher: Arc<AlertDispatcher>,
    logs: Arc<LogStore>,
}

impl Worker {
    pub fn new(
        store: Arc<dyn RecordStore>,
        executor: Arc<ProbeExecutor>,
        dispatcher: Arc<AlertDispatcher>,
        logs: Arc<LogStore>,
    ) -> Self {
        Self {
            store,
            executor,
            dispatcher,
            logs,
        }
    }

    /// Run one probe cycle.
    ///
    /// Every check gets its own pipeline task; they proceed concurrently and
    /// complete in whatever order their I/O resolves. One check's failure is
    /// invisible to its siblings.
    pub async fn run_cycle(&self) {
        let ids = match self.store.list(CHECKS).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Could not enumerate checks");
                return;
            }
        };

        if ids.is_empty() {
            debug!("No checks to process");
            return;
        }

        let mut pipelines = Vec::with_capacity(ids.len());
        for id in ids {
            let worker = self.clone();
            pipelines.push(tokio::spawn(async move {
                worker.process_check(&id).await;
            }));
        }
        for pipeline in pipelines {
            let _ = pipeline.await;
        }
    }

    /// Pipeline for a single check: read → validate → probe → process.
    async fn process_check(&self, id: &str) {
        let raw = match self.store.read(CHECKS, id).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(id, error = %e, "Could not read check record");
                return;
            }
        };

        let check = match validate::validate_check(&raw) {
            Ok(check) => check,
            Err(e) => {
                warn!(id, error = %e, "Dropping malformed check");
                return;
            }
        };

        let outcome = self.executor.probe(&check.probe_spec()).await;
        self.process_outcome(check, outcome).await;
    }

    /// Fold one outcome into the check's state, audit it, persist it, and
    /// alert when the state actually changed.
    ///
    /// A check that has never been probed (`last_checked` absent) can
    /// transition state but never warrants an alert: its default "down" was
    /// assigned, not observed.
    async fn process_outcome(&self, check: Check, outcome: Outcome) {
        let new_state = if outcome.is_success(&check.success_codes) {
            CheckState::Up
        } else {
            CheckState::Down
        };

        let alert_warranted = check.last_checked.is_some() && check.state != new_state;
        let now = epoch_millis();

        self.audit(&check, &outcome, new_state, alert_warranted, now)
            .await;

        let mut updated = check;
        updated.state = new_state;
        updated.last_checked = Some(now);

        let record = match serde_json::to_value(&updated) {
            Ok(record) => record,
            Err(e) => {
                warn!(id = %updated.id, error = %e, "Could not serialize check record");
                return;
            }
        };

        if let Err(e) = self.store.update(CHECKS, &updated.id, &record).await {
            // No in-cycle retry and no revert: the next cycle re-evaluates
            // this check. The alert is suppressed with the failed write.
            warn!(id = %updated.id, error = %e, "Could not persist check state");
            return;
        }

        if alert_warranted {
            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.alert(&updated).await;
            });
        } else {
            debug!(id = %updated.id, state = %updated.state, "State unchanged, no alert");
        }
    }

    /// Append one audit record. Fire-and-forget: a failed append is logged
    /// and never rolls back the state update or blocks the cycle.
    async fn audit(
        &self,
        check: &Check,
        outcome: &Outcome,
        state: CheckState,
        alert_warranted: bool,
        time: u64,
    ) {
        let record = AuditRecord {
            check: check.clone(),
            outcome: outcome.clone(),
            state,
            alert_warranted,
            time,
        };

        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!(id = %check.id, error = %e, "Could not serialize audit record");
                return;
            }
        };

        if let Err(e) = self.logs.append(&check.id, &line).await {
            warn!(id = %check.id, error = %e, "Could not append audit record");
        }
    }
}

//! Log rotation: archive and truncate live audit logs.

use crate::logs::LogStore;
use crate::types::epoch_millis;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs one rotation cycle over every live log.
#[derive(Clone)]
pub struct Rotator {
    logs: Arc<LogStore>,
}

impl Rotator {
    pub fn new(logs: Arc<LogStore>) -> Self {
        Self { logs }
    }

    /// Rotate every live log. Each log is handled independently; a failure
    /// on one log skips only that log.
    pub async fn run_cycle(&self) {
        let ids = match self.logs.list(false).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Could not list logs to rotate");
                return;
            }
        };

        if ids.is_empty() {
            debug!("No logs to rotate");
            return;
        }

        for id in ids {
            self.rotate(&id).await;
        }
    }

    async fn rotate(&self, id: &str) {
        let archive_id = format!("{id}-{}", epoch_millis());

        if let Err(e) = self.logs.compress(id, &archive_id).await {
            warn!(id, error = %e, "Could not compress log");
            return;
        }

        if let Err(e) = self.logs.truncate(id).await {
            warn!(id, error = %e, "Could not truncate rotated log");
            return;
        }

        debug!(id, archive = %archive_id, "Rotated log");
    }
}

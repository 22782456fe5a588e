//! Engine wiring and lifecycle.

use crate::alert::{AlertDispatcher, HttpGateway};
use crate::config::Config;
use crate::logs::LogStore;
use crate::rotator::Rotator;
use crate::store::{CHECKS, FsRecordStore};
use crate::supervisor::Supervisor;
use crate::worker::Worker;
use common::{Error, Result};
use probe::ProbeExecutor;
use std::sync::Arc;
use tracing::info;

/// The assembled monitoring engine.
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the engine until the process is interrupted.
    pub async fn run(self) -> Result<()> {
        info!("Starting vigil engine");

        tokio::fs::create_dir_all(self.config.paths.data_dir.join(CHECKS)).await?;
        tokio::fs::create_dir_all(&self.config.paths.logs_dir).await?;

        let store = Arc::new(FsRecordStore::new(&self.config.paths.data_dir));
        let logs = Arc::new(LogStore::new(&self.config.paths.logs_dir));

        let gateway = Arc::new(HttpGateway::new(
            &self.config.gateway.endpoint,
            &self.config.gateway.sender,
            &self.config.gateway.account,
            &self.config.gateway.token,
        )?);
        let dispatcher = Arc::new(AlertDispatcher::new(gateway));

        let executor = Arc::new(ProbeExecutor::new().map_err(Error::probe)?);

        let worker = Worker::new(store, executor, dispatcher, logs.clone());
        let rotator = Rotator::new(logs);

        let supervisor = Supervisor::start(
            worker,
            rotator,
            self.config.scheduling.probe_interval,
            self.config.scheduling.rotation_interval,
        );

        tokio::signal::ctrl_c().await?;
        info!("Interrupt received, shutting down");
        supervisor.shutdown();

        Ok(())
    }
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use roster_core::AppConfig;
use roster_worker::{HttpRollupServer, PollLoop};
use tokio::sync::broadcast;
use tracing::info;

/// The roster backend: one poll loop against the configured rollup server.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Builds the HTTP client and drives the poll loop until shutdown.
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let server = HttpRollupServer::new(self.config.rollup.clone())
            .context("Failed to create rollup HTTP client")?;
        let poll_loop = PollLoop::new(Arc::new(server))
            .with_idle_backoff(Duration::from_millis(self.config.rollup.idle_backoff_ms));

        poll_loop
            .run(shutdown_rx)
            .await
            .context("Lost connection to the rollup server")?;

        info!("Application stopped");
        Ok(())
    }
}

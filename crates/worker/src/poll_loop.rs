use std::sync::Arc;
use std::time::Duration;

use roster_core::RollupResult;
use roster_dispatcher::dispatch;
use roster_domain::{FinishStatus, RollupRequest, Roster};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::components::RollupServer;

/// What one iteration of the loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    /// The server had no pending request
    Idle,
    Handled {
        request_type: String,
        status: FinishStatus,
    },
}

/// The dapp's main loop: finish, handle the returned request, repeat.
///
/// Owns the roster. Requests are handled strictly one at a time and every
/// event of a request is sent before the next `/finish`.
pub struct PollLoop {
    server: Arc<dyn RollupServer>,
    roster: Roster,
    status: FinishStatus,
    idle_backoff: Duration,
}

impl PollLoop {
    pub fn new(server: Arc<dyn RollupServer>) -> Self {
        Self {
            server,
            roster: Roster::new(),
            status: FinishStatus::Accept,
            idle_backoff: Duration::ZERO,
        }
    }

    pub fn with_idle_backoff(mut self, idle_backoff: Duration) -> Self {
        self.idle_backoff = idle_backoff;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Status that the next `/finish` will carry
    pub fn status(&self) -> FinishStatus {
        self.status
    }

    /// Runs a single finish/handle iteration.
    pub async fn step(&mut self) -> RollupResult<Cycle> {
        debug!("Sending finish with status {}", self.status);
        let request = self.server.finish(self.status).await?;
        self.process(request).await
    }

    /// Runs until a shutdown signal arrives or the server connection fails.
    ///
    /// The signal is only observed while waiting on `/finish`, so a request
    /// that has been received is always handled and its events sent.
    pub async fn run(mut self, mut shutdown_rx: broadcast::Receiver<()>) -> RollupResult<()> {
        info!("Starting poll loop");
        loop {
            debug!("Sending finish with status {}", self.status);
            let request = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Poll loop shutting down");
                    return Ok(());
                }
                request = self.server.finish(self.status) => request?,
            };
            self.process(request).await?;
        }
    }

    async fn process(&mut self, request: Option<RollupRequest>) -> RollupResult<Cycle> {
        let Some(request) = request else {
            debug!("No pending rollup request, trying again");
            if !self.idle_backoff.is_zero() {
                tokio::time::sleep(self.idle_backoff).await;
            }
            return Ok(Cycle::Idle);
        };

        let outcome = dispatch(&mut self.roster, &request);
        self.status = outcome.status;

        for event in &outcome.events {
            self.server.send_event(event).await?;
        }

        info!(
            request_type = request.request_type(),
            status = %outcome.status,
            students = self.roster.len(),
            "Request handled"
        );
        Ok(Cycle::Handled {
            request_type: request.request_type().to_string(),
            status: outcome.status,
        })
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use roster_core::{RollupConfig, RollupError, RollupResult};
use roster_domain::{
    encode_payload, FinishRequest, FinishStatus, OutboundEvent, PayloadBody, RollupRequest,
};
use tracing::{debug, info, warn};

use super::RollupServer;

/// [`RollupServer`] over the rollup node's HTTP API.
///
/// `/finish` is a long poll and never times out. The configured timeout only
/// applies to notices and reports.
pub struct HttpRollupServer {
    config: RollupConfig,
    http_client: reqwest::Client,
    event_timeout: Option<Duration>,
}

impl HttpRollupServer {
    pub fn new(config: RollupConfig) -> RollupResult<Self> {
        let http_client = reqwest::Client::builder().build()?;
        let event_timeout = config.request_timeout_seconds.map(Duration::from_secs);

        info!("HTTP rollup server url is {}", config.server_url);
        Ok(Self {
            config,
            http_client,
            event_timeout,
        })
    }
}

#[async_trait]
impl RollupServer for HttpRollupServer {
    async fn finish(&self, status: FinishStatus) -> RollupResult<Option<RollupRequest>> {
        let url = self.config.endpoint("finish");

        let response = self
            .http_client
            .post(&url)
            .json(&FinishRequest { status })
            .send()
            .await?;

        let http_status = response.status();
        debug!("Received finish status {}", http_status);

        if http_status == StatusCode::ACCEPTED {
            return Ok(None);
        }
        if !http_status.is_success() {
            return Err(RollupError::unexpected_status("/finish", http_status.as_u16()));
        }

        let body = response.bytes().await?;
        let request = RollupRequest::from_slice(&body)
            .map_err(|e| RollupError::invalid_request(e.to_string()))?;
        Ok(Some(request))
    }

    async fn send_event(&self, event: &OutboundEvent) -> RollupResult<()> {
        let url = self.config.endpoint(event.endpoint());
        let body = PayloadBody {
            payload: encode_payload(event.text()),
        };

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(timeout) = self.event_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("{} sent, response status {}", event.endpoint(), status);
        } else {
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Rollup server did not accept {}: HTTP {} - {}",
                event.endpoint(),
                status,
                text
            );
        }
        Ok(())
    }
}

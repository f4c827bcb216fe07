use async_trait::async_trait;
use roster_core::RollupResult;
use roster_domain::{FinishStatus, OutboundEvent, RollupRequest};

/// The rollup server as seen from the dapp
#[async_trait]
pub trait RollupServer: Send + Sync {
    /// Reports the status of the previous request and asks for the next one.
    /// `None` means no request is pending.
    async fn finish(&self, status: FinishStatus) -> RollupResult<Option<RollupRequest>>;

    /// Sends a notice or a report.
    async fn send_event(&self, event: &OutboundEvent) -> RollupResult<()>;
}

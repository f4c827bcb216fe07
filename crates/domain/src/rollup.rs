//! Wire types exchanged with the rollup HTTP server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::FinishStatus;

/// Body of `POST /finish`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinishRequest {
    pub status: FinishStatus,
}

/// Body of `POST /notice` and `POST /report`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadBody {
    pub payload: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RequestEnvelope {
    request_type: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceMetadata {
    pub msg_sender: String,
    #[serde(default)]
    pub epoch_index: Option<u64>,
    #[serde(default)]
    pub input_index: Option<u64>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    pub metadata: AdvanceMetadata,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectRequest {
    pub payload: String,
}

/// A request handed out by `/finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupRequest {
    Advance(AdvanceRequest),
    Inspect(InspectRequest),
    /// A `request_type` this backend does not know; answered with `reject`.
    Unsupported { request_type: String },
}

impl RollupRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: RequestEnvelope = serde_json::from_slice(body)?;
        let request = match envelope.request_type.as_str() {
            "advance_state" => RollupRequest::Advance(serde_json::from_value(envelope.data)?),
            "inspect_state" => RollupRequest::Inspect(serde_json::from_value(envelope.data)?),
            _ => RollupRequest::Unsupported {
                request_type: envelope.request_type,
            },
        };
        Ok(request)
    }

    pub fn request_type(&self) -> &str {
        match self {
            RollupRequest::Advance(_) => "advance_state",
            RollupRequest::Inspect(_) => "inspect_state",
            RollupRequest::Unsupported { request_type } => request_type,
        }
    }
}

use thiserror::Error;

/// Errors raised while talking to the rollup HTTP server. All of them stop
/// the poll loop.
#[derive(Debug, Error)]
pub enum RollupError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status from {endpoint}: HTTP {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Invalid rollup request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RollupError {
    pub fn unexpected_status<S: Into<String>>(endpoint: S, status: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
}

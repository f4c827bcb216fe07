use thiserror::Error;

/// Failure to turn an inbound payload into text or a command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("malformed command: {0}")]
    MalformedCommand(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedCommand(msg.into())
    }
}

use thiserror::Error;

use crate::MatchId;

/// Wire codec failures
#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("failed to encode message: {0}")]
    Encode(postcard::Error),

    #[error("failed to decode message: {0}")]
    Decode(postcard::Error),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
}

/// Failure at the transport boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("send failed: {0}")]
    Send(String),
}

/// Session contract failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown match {0}")]
    UnknownMatch(MatchId),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<rally_core::ValidationError> for SessionError {
    fn from(err: rally_core::ValidationError) -> Self {
        SessionError::InvalidInput(err.to_string())
    }
}

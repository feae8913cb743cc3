use rally_proto::{ProtoError, SessionError};
use thiserror::Error;

/// Reasons a match cannot proceed on this client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("no player name given and none remembered")]
    MissingName,

    #[error("no match is set up")]
    NoMatch,

    #[error("session failed: {0}")]
    Session(#[from] SessionError),

    #[error("bad server message: {0}")]
    Proto(#[from] ProtoError),

    #[error("preferences could not be encoded: {0}")]
    Preferences(#[from] serde_json::Error),
}

use thiserror::Error;

use crate::fsm::{MatchAction, MatchPhase};

/// Rejected player input at the match boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("player name is {len} characters, the limit is {max}")]
    NameTooLong { len: usize, max: usize },
}

/// An action requested in a phase that does not accept it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{action:?} is not allowed while {phase:?}")]
pub struct StateError {
    pub action: MatchAction,
    pub phase: MatchPhase,
}

//! Wire protocol for rally matches
//!
//! Uses postcard for efficient binary serialization

pub mod error;
pub mod match_id;
pub mod service;
pub mod snapshot;

pub use error::*;
pub use match_id::*;
pub use service::*;
pub use snapshot::*;

use postcard::{from_bytes, to_allocvec};
use rally_core::{Intent, Outcome};
use serde::{Deserialize, Serialize};

// ============================================================================
// C2S Messages (Client to Server)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum C2S {
    /// Subscribe to a match's push channel
    Join { match_id: MatchId },

    /// Decoded paddle intent, held until the next one arrives
    Intent { intent: Intent },

    /// Pause a running match or resume a paused one
    TogglePause,

    /// Display lost focus
    FocusLost,
}

// ============================================================================
// S2C Messages (Server to Client)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum S2C {
    /// Subscription accepted
    Joined { match_id: MatchId },

    /// Authoritative match state
    GameUpdate(MatchSnapshot),

    /// Final result, sent once when the match ends
    MatchEnded {
        outcome: Outcome,
        human_score: u32,
        opponent_score: u32,
    },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl C2S {
    /// Serialize C2S message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        to_allocvec(self).map_err(ProtoError::Encode)
    }

    /// Deserialize C2S message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        from_bytes(bytes).map_err(ProtoError::Decode)
    }
}

impl S2C {
    /// Serialize S2C message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        to_allocvec(self).map_err(ProtoError::Encode)
    }

    /// Deserialize S2C message from bytes, rejecting foreign snapshot versions
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        let msg: S2C = from_bytes(bytes).map_err(ProtoError::Decode)?;
        if let S2C::GameUpdate(snapshot) = &msg {
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(ProtoError::UnsupportedVersion {
                    found: snapshot.version,
                    expected: SNAPSHOT_VERSION,
                });
            }
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rally_core::{Config, Match};

    fn snapshot() -> MatchSnapshot {
        let game = Match::new("Ana", "easy", Config::new(), 1).unwrap();
        MatchSnapshot::capture(&game, MatchId::parse("Q7Z2K").unwrap(), 1, 0)
    }

    #[test]
    fn test_c2s_serialization() {
        let msg = C2S::Intent {
            intent: Intent::Up,
        };
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        let decoded = C2S::from_bytes(&bytes).expect("Deserialization should succeed");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_s2c_game_update_serialization() {
        let msg = S2C::GameUpdate(snapshot());
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        match S2C::from_bytes(&bytes).expect("Deserialization should succeed") {
            S2C::GameUpdate(decoded) => {
                assert_eq!(decoded.seq, 1);
                assert_eq!(decoded.human.name, "Ana");
                assert_eq!(decoded.ball.speed, 3.0);
            }
            other => panic!("Message type mismatch: {other:?}"),
        }
    }

    #[test]
    fn test_foreign_snapshot_version_is_rejected() {
        let mut stale = snapshot();
        stale.version = SNAPSHOT_VERSION + 1;
        let bytes = S2C::GameUpdate(stale).to_bytes().unwrap();

        match S2C::from_bytes(&bytes) {
            Err(ProtoError::UnsupportedVersion { found, expected }) => {
                assert_eq!(found, SNAPSHOT_VERSION + 1);
                assert_eq!(expected, SNAPSHOT_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(matches!(
            S2C::from_bytes(&[0xff, 0xff, 0xff]),
            Err(ProtoError::Decode(_))
        ));
        assert!(matches!(C2S::from_bytes(&[]), Err(ProtoError::Decode(_))));
    }
}

//! Network message handling

use rally_core::{GameEvent, Intent};
use rally_proto::{MatchId, ProtoError, C2S, S2C};

use crate::error::ClientError;
use crate::game::{ClientGame, MatchResult};

/// Handle incoming server message
pub fn handle_message(msg: S2C, game: &mut ClientGame) {
    match msg {
        S2C::Joined { match_id } => {
            log::info!("Subscribed to match {match_id}");
        }
        S2C::GameUpdate(snapshot) => {
            game.receive_snapshot(snapshot);
        }
        S2C::MatchEnded {
            outcome,
            human_score,
            opponent_score,
        } => {
            game.receive_result(MatchResult {
                outcome,
                human_score,
                opponent_score,
            });
        }
    }
}

/// Decode and handle one server frame
pub fn handle_bytes(bytes: &[u8], game: &mut ClientGame) -> Result<(), ClientError> {
    let msg = S2C::from_bytes(bytes).map_err(|e| {
        log::warn!("Dropping server frame: {e}");
        e
    })?;
    handle_message(msg, game);
    Ok(())
}

/// Create join message bytes
pub fn create_join_message(match_id: MatchId) -> Result<Vec<u8>, ProtoError> {
    C2S::Join { match_id }.to_bytes()
}

/// Create intent message bytes
pub fn create_intent_message(intent: Intent) -> Result<Vec<u8>, ProtoError> {
    C2S::Intent { intent }.to_bytes()
}

/// Encode drained events for a page script, one tagged object per event
pub fn encode_events(events: &[GameEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string(events)
}

use rally_core::{Intent, Match, MatchPhase, StateError};
use rally_proto::{MatchId, MatchSnapshot, ProtoError, TransportError, C2S, S2C};

use crate::transport::GameClient;

/// Authoritative host for one match
///
/// The single writer of the canonical [`Match`]. Intents received between
/// ticks are held and applied on the next [`MatchHost::step`].
pub struct MatchHost {
    match_id: MatchId,
    game: Match,
    clients: Vec<Box<dyn GameClient>>,
    intent: Intent,
    seq: u64,
    ticks: u64,
    end_sent: bool,
}

impl MatchHost {
    /// Snapshots are pushed every few ticks rather than every tick
    pub const BROADCAST_EVERY_TICKS: u64 = 3;

    pub fn new(match_id: MatchId, game: Match) -> Self {
        Self {
            match_id,
            game,
            clients: Vec::new(),
            intent: Intent::Hold,
            seq: 0,
            ticks: 0,
            end_sent: false,
        }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn phase(&self) -> MatchPhase {
        self.game.phase()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Ended, and every subscriber has been told
    pub fn is_finished(&self) -> bool {
        self.end_sent
    }

    /// Subscribe a push channel, greeting it with the current state
    pub fn add_client(&mut self, client: Box<dyn GameClient>, now: u64) -> Result<(), TransportError> {
        let greeting = [
            S2C::Joined {
                match_id: self.match_id,
            },
            S2C::GameUpdate(self.snapshot(now)),
        ];
        for msg in &greeting {
            let bytes = msg
                .to_bytes()
                .map_err(|e| TransportError::Send(e.to_string()))?;
            client.send_bytes(&bytes)?;
        }

        self.clients.push(client);
        log::info!(
            "Match {}: client joined ({} connected)",
            self.match_id,
            self.clients.len()
        );
        Ok(())
    }

    /// Decode and apply one client frame
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtoError> {
        let msg = C2S::from_bytes(bytes)?;
        self.handle_message(msg);
        Ok(())
    }

    pub fn handle_message(&mut self, msg: C2S) {
        match msg {
            C2S::Join { match_id } => {
                log::debug!("Match {}: ignoring repeated join for {match_id}", self.match_id);
            }
            C2S::Intent { intent } => {
                if intent != self.intent {
                    log::debug!("Match {}: intent {intent:?}", self.match_id);
                }
                self.intent = intent;
            }
            C2S::TogglePause => {
                self.game.toggle_pause();
            }
            C2S::FocusLost => {
                self.game.focus_lost();
            }
        }
    }

    /// Idle → Countdown
    pub fn start(&mut self, now: u64) -> Result<(), StateError> {
        self.game.start(now).into_result()?;
        self.broadcast_state(now);
        Ok(())
    }

    /// Advance one tick and push state to subscribers
    pub fn step(&mut self, now: u64) {
        if self.end_sent {
            return;
        }

        let phase_before = self.game.phase();
        self.game.tick(now, self.intent);
        self.ticks += 1;

        // Core events drive the display side; the host only needs phase changes
        self.game.drain_events();

        if self.ticks % 60 == 0 {
            log::debug!(
                "Match {}: tick={}, phase={:?}, clients={}",
                self.match_id,
                self.ticks,
                self.game.phase(),
                self.clients.len()
            );
        }

        let phase_changed = self.game.phase() != phase_before;
        if self.ticks == 1 || phase_changed || self.ticks % Self::BROADCAST_EVERY_TICKS == 0 {
            self.broadcast_state(now);
        }

        if let Some(outcome) = self.game.outcome() {
            let (human_score, opponent_score) = self.game.scores();
            self.broadcast(&S2C::MatchEnded {
                outcome,
                human_score,
                opponent_score,
            });
            self.end_sent = true;
        }
    }

    /// State as of the last pushed snapshot
    pub fn snapshot(&self, now: u64) -> MatchSnapshot {
        MatchSnapshot::capture(&self.game, self.match_id, self.seq, now)
    }

    pub fn broadcast_state(&mut self, now: u64) {
        self.seq += 1;
        let msg = S2C::GameUpdate(self.snapshot(now));
        self.broadcast(&msg);
    }

    /// Send to every subscriber, dropping channels that fail
    fn broadcast(&mut self, msg: &S2C) {
        if self.clients.is_empty() {
            return;
        }

        let bytes = match msg.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Match {}: failed to encode broadcast: {e}", self.match_id);
                return;
            }
        };

        let match_id = self.match_id;
        self.clients.retain(|client| match client.send_bytes(&bytes) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Match {match_id}: dropping client: {e}");
                false
            }
        });
    }
}

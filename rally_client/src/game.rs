//! Display-side game facade
//!
//! Owns the locally predicted match, its snapshot inbox and the session
//! flow. Everything a renderer needs is exposed as values or drained events.

use rally_core::{
    Ball, Difficulty, GameEvent, Intent, Match, MatchPhase, Outcome, Paddle, Player, Side,
};
use rally_proto::{MatchId, MatchService, MatchSnapshot, C2S};

use crate::error::ClientError;
use crate::fsm::{SessionAction, SessionFsm, SessionState};
use crate::preferences::{PreferenceStore, Preferences};
use crate::reconcile::Reconciler;

/// Final result as announced by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: Outcome,
    pub human_score: u32,
    pub opponent_score: u32,
}

#[derive(Default)]
pub struct ClientGame {
    session: SessionFsm,
    reconciler: Reconciler,
    game: Option<Match>,
    last_sent_intent: Option<Intent>,
    result: Option<MatchResult>,
    pending_events: Vec<GameEvent>,
}

impl ClientGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a match through `service` and build the local mirror
    ///
    /// Missing arguments fall back to remembered preferences. Preferences
    /// are written only after the match exists. Any current match is left
    /// first; on failure the client stays Idle.
    pub fn setup<S: MatchService + ?Sized>(
        &mut self,
        service: &mut S,
        store: &mut dyn PreferenceStore,
        player_name: Option<&str>,
        difficulty: Option<&str>,
        now: u64,
    ) -> Result<MatchId, ClientError> {
        let prefs = Preferences::load(store);
        let name = player_name
            .map(str::to_string)
            .or(prefs.player_name)
            .ok_or(ClientError::MissingName)?;
        let difficulty = difficulty
            .map(str::to_string)
            .or(prefs.difficulty)
            .unwrap_or_else(|| Difficulty::default().to_string());

        if !self.session.can_transition(SessionAction::CreateMatch) {
            log::info!("Leaving {:?} session for a new match", self.session.state());
            self.leave();
        }
        self.session.transition(SessionAction::CreateMatch);
        let created = service
            .create_match(&name, &difficulty)
            .and_then(|id| service.fetch_state(&id).map(|snapshot| (id, snapshot)));
        let (match_id, snapshot) = match created {
            Ok(created) => created,
            Err(e) => {
                log::warn!("Match setup failed: {e}");
                self.session.transition(SessionAction::CreateFailed);
                return Err(e.into());
            }
        };

        Preferences {
            player_name: Some(name),
            difficulty: Some(difficulty),
        }
        .save(store)?;

        self.adopt(match_id, snapshot, now);
        self.session.transition(SessionAction::Created);
        log::info!("Match {match_id} ready");
        Ok(match_id)
    }

    /// Follow a match created elsewhere; the mirror is built from the first
    /// snapshot that arrives
    pub fn join(&mut self, match_id: MatchId) -> C2S {
        self.reset_match();
        self.reconciler.expect_match(match_id);
        self.session.transition(SessionAction::JoinMatch);
        C2S::Join { match_id }
    }

    fn adopt(&mut self, match_id: MatchId, snapshot: MatchSnapshot, now: u64) {
        self.reset_match();
        self.reconciler.expect_match(match_id);
        self.reconciler.push(snapshot);
        self.reconciler.drain_into(&mut self.game, now);
    }

    fn reset_match(&mut self) {
        self.game = None;
        self.result = None;
        self.last_sent_intent = None;
        self.pending_events.clear();
    }

    /// Ask the host to start, and start the local countdown alongside it
    pub fn request_start<S: MatchService + ?Sized>(
        &mut self,
        service: &mut S,
        now: u64,
    ) -> Result<(), ClientError> {
        let match_id = self.reconciler.match_id().ok_or(ClientError::NoMatch)?;
        let game = self.game.as_mut().ok_or(ClientError::NoMatch)?;
        service.start_match(&match_id)?;
        game.start(now);
        self.session.transition(SessionAction::Start);
        Ok(())
    }

    /// Queue an authoritative snapshot for the next frame
    pub fn receive_snapshot(&mut self, snapshot: MatchSnapshot) {
        self.reconciler.push(snapshot);
    }

    pub fn receive_result(&mut self, result: MatchResult) {
        log::info!(
            "Match over: {:?} ({}-{})",
            result.outcome,
            result.human_score,
            result.opponent_score
        );
        self.result = Some(result);
        if let Some(game) = self.game.as_mut() {
            game.sync_scores(result.human_score, result.opponent_score);
        }
        self.session.transition(SessionAction::MatchEnded);
    }

    /// One display frame: merge snapshots, then tick the local prediction
    ///
    /// Returns an intent message when the intent changed since the last one
    /// sent.
    pub fn frame(&mut self, now: u64, intent: Intent) -> Option<C2S> {
        self.reconciler.drain_into(&mut self.game, now);

        let game = self.game.as_mut()?;
        game.tick(now, intent);
        self.pending_events.extend(game.drain_events());

        if game.phase() == MatchPhase::Ended && self.session.state() != SessionState::Finished {
            self.session.transition(SessionAction::MatchEnded);
        }

        if self.last_sent_intent == Some(intent) {
            return None;
        }
        self.last_sent_intent = Some(intent);
        Some(C2S::Intent { intent })
    }

    /// Toggle pause locally; returns the message for the host if it applied
    pub fn toggle_pause(&mut self) -> Option<C2S> {
        let game = self.game.as_mut()?;
        let result = game.toggle_pause();
        self.pending_events.extend(game.drain_events());
        result.success.then_some(C2S::TogglePause)
    }

    pub fn focus_lost(&mut self) -> Option<C2S> {
        let game = self.game.as_mut()?;
        let result = game.focus_lost();
        self.pending_events.extend(game.drain_events());
        result.success.then_some(C2S::FocusLost)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(game) = self.game.as_mut() {
            game.resize(width, height);
        }
    }

    /// Leave the current match and return to Idle
    pub fn leave(&mut self) {
        self.reset_match();
        self.reconciler = Reconciler::new();
        self.session.reset();
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn match_id(&self) -> Option<MatchId> {
        self.reconciler.match_id()
    }

    pub fn game(&self) -> Option<&Match> {
        self.game.as_ref()
    }

    pub fn phase(&self) -> MatchPhase {
        self.game
            .as_ref()
            .map_or(MatchPhase::Idle, |game| game.phase())
    }

    pub fn ball(&self) -> Option<Ball> {
        self.game.as_ref().map(|game| game.ball())
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.game.as_ref().map(|game| game.paddle(side))
    }

    pub fn player(&self, side: Side) -> Option<Player> {
        self.game.as_ref().and_then(|game| game.player(side))
    }

    pub fn scores(&self) -> (u32, u32) {
        self.game.as_ref().map_or((0, 0), |game| game.scores())
    }

    pub fn remaining_ms(&self, now: u64) -> Option<u64> {
        self.game.as_ref().map(|game| game.remaining_ms(now))
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.game.as_ref().map(|game| game.difficulty())
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }
}

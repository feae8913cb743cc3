//! A single match: the world, its phase machine and the match clock.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Ball, Intent, Paddle, Player, Side};
use crate::config::Config;
use crate::countdown::Countdown;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::ValidationError;
use crate::fsm::{MatchAction, MatchFsm, MatchPhase, TransitionResult};
use crate::map::GameMap;
use crate::resources::{Events, GameEvent, GameRng, Outcome};
use crate::systems::drive_opponent;
use crate::{create_ball, create_paddle, find_ball, find_paddle, player_scores, step};

/// Display name given to the scripted opponent
pub const OPPONENT_NAME: &str = "Computer";

/// Whether a match decides its own points and phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRole {
    /// Awards points, completes the countdown and ends the match
    Authority,
    /// Predicts motion locally; points and phase changes are adopted from
    /// authoritative snapshots
    Mirror,
}

pub struct Match {
    world: World,
    map: GameMap,
    config: Config,
    profile: DifficultyProfile,
    rng: GameRng,
    fsm: MatchFsm,
    role: MatchRole,
    countdown: Option<Countdown>,
    started_at: Option<u64>,
    outcome: Option<Outcome>,
    events: Events,
    ball: Entity,
    human: Entity,
    opponent: Entity,
    tick: u64,
}

impl Match {
    /// New idle match; unknown difficulty names fall back to normal
    pub fn new(
        player_name: &str,
        difficulty: &str,
        config: Config,
        seed: u64,
    ) -> Result<Self, ValidationError> {
        Self::with_profile(player_name, DifficultyProfile::from_name(difficulty), config, seed)
    }

    pub fn with_profile(
        player_name: &str,
        profile: DifficultyProfile,
        config: Config,
        seed: u64,
    ) -> Result<Self, ValidationError> {
        let human_player = Player::new(player_name)?;
        let opponent_player = Player::new(OPPONENT_NAME)?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);
        let map = GameMap::from_config(&config);

        let human = create_paddle(
            &mut world,
            Paddle::new(
                Side::Left,
                map.paddle_spawn(Side::Left, &config),
                config.paddle_width,
                config.paddle_height,
                config.human_paddle_speed,
            ),
            human_player,
        );
        let opponent = create_paddle(
            &mut world,
            Paddle::new(
                Side::Right,
                map.paddle_spawn(Side::Right, &config),
                config.paddle_width,
                config.paddle_height,
                profile.opponent_paddle_speed,
            ),
            opponent_player,
        );
        let ball = create_ball(
            &mut world,
            Ball::served(
                map.ball_spawn(),
                config.ball_radius,
                config.ball_physics(profile.ball_speed),
                &mut rng,
            ),
        );

        log::info!(
            "New match for {:?} at {} difficulty",
            player_name.trim(),
            profile.difficulty
        );

        Ok(Self {
            world,
            map,
            config,
            profile,
            rng,
            fsm: MatchFsm::new(),
            role: MatchRole::Authority,
            countdown: None,
            started_at: None,
            outcome: None,
            events: Events::new(),
            ball,
            human,
            opponent,
            tick: 0,
        })
    }

    /// Turn this match into a locally-predicted mirror
    pub fn into_mirror(mut self) -> Self {
        self.role = MatchRole::Mirror;
        self
    }

    pub fn role(&self) -> MatchRole {
        self.role
    }

    pub fn phase(&self) -> MatchPhase {
        self.fsm.phase()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn difficulty(&self) -> Difficulty {
        self.profile.difficulty
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Timestamp (ms) of the tick that entered Running
    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn ball(&self) -> Ball {
        find_ball(&self.world).unwrap_or_else(|| {
            Ball::new(
                self.map.ball_spawn(),
                self.config.ball_radius,
                self.config.ball_physics(self.profile.ball_speed),
            )
        })
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        find_paddle(&self.world, side).unwrap_or_else(|| {
            Paddle::new(
                side,
                self.map.paddle_spawn(side, &self.config),
                self.config.paddle_width,
                self.config.paddle_height,
                0.0,
            )
        })
    }

    pub fn player(&self, side: Side) -> Option<Player> {
        let entity = self.paddle_entity(side);
        self.world.get::<&Player>(entity).ok().map(|p| (*p).clone())
    }

    /// (human, opponent)
    pub fn scores(&self) -> (u32, u32) {
        player_scores(&self.world)
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Idle → Countdown: serve from the centre and begin counting down
    pub fn start(&mut self, now: u64) -> TransitionResult {
        let result = self.transition(MatchAction::Start);
        if result.success {
            self.reset_ball();
            let mut countdown = Countdown::from_config(now, &self.config);
            if let Some(step) = countdown.poll(now) {
                self.events.push(GameEvent::CountdownStep { remaining: step });
            }
            self.countdown = Some(countdown);
        }
        result
    }

    /// Running ⇄ Paused
    pub fn toggle_pause(&mut self) -> TransitionResult {
        match self.fsm.phase() {
            MatchPhase::Paused => self.transition(MatchAction::Resume),
            _ => self.transition(MatchAction::Pause),
        }
    }

    /// Display lost focus: pause a running match, never resume
    pub fn focus_lost(&mut self) -> TransitionResult {
        self.transition(MatchAction::FocusLost)
    }

    /// Milliseconds left on the match clock
    ///
    /// The clock starts when Running is first entered and keeps running
    /// while paused.
    pub fn remaining_ms(&self, now: u64) -> u64 {
        let duration = self.config.match_duration_ms;
        match self.started_at {
            None => duration,
            Some(start) => duration.saturating_sub(now.saturating_sub(start)),
        }
    }

    /// Advance the match by one tick
    pub fn tick(&mut self, now: u64, intent: Intent) {
        self.tick += 1;
        match self.fsm.phase() {
            MatchPhase::Countdown => self.tick_countdown(now),
            MatchPhase::Running => self.tick_running(now, intent),
            MatchPhase::Idle | MatchPhase::Paused | MatchPhase::Ended => {}
        }
    }

    fn tick_countdown(&mut self, now: u64) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        if let Some(step) = countdown.poll(now) {
            log::debug!("Countdown: {step}");
            self.events.push(GameEvent::CountdownStep { remaining: step });
        }

        if countdown.is_done(now) && self.role == MatchRole::Authority {
            self.countdown = None;
            if self.transition(MatchAction::CountdownDone).success {
                self.started_at = Some(now);
            }
        }
    }

    fn tick_running(&mut self, now: u64, intent: Intent) {
        let authority = self.role == MatchRole::Authority;

        step(
            &mut self.world,
            &self.map,
            &self.config,
            intent,
            &mut self.events,
            &mut self.rng,
            authority,
        );

        if authority {
            if let Some(outcome) = self.check_terminal(now) {
                self.finish(outcome);
                return;
            }
        }

        drive_opponent(
            &mut self.world,
            &self.map,
            self.profile.reaction_probability,
            &mut self.rng,
        );
    }

    /// First true wins: a score reached the target, or time ran out
    fn check_terminal(&self, now: u64) -> Option<Outcome> {
        let (human, opponent) = self.scores();
        let target = self.config.points_to_win;
        let timed_out = self.started_at.is_some() && self.remaining_ms(now) == 0;

        if human >= target || opponent >= target || timed_out {
            Some(Outcome::from_scores(human, opponent))
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if !self.transition(MatchAction::End).success {
            return;
        }
        let (human_score, opponent_score) = self.scores();
        log::info!("Match ended {outcome:?} ({human_score}-{opponent_score})");
        self.outcome = Some(outcome);
        self.events.push(GameEvent::MatchEnded {
            outcome,
            human_score,
            opponent_score,
        });
    }

    fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let result = self.fsm.transition(action);
        if result.success {
            self.events.push(GameEvent::PhaseChanged {
                from: result.from,
                to: result.to,
            });
        }
        result
    }

    fn paddle_entity(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.human,
            Side::Right => self.opponent,
        }
    }

    fn reset_ball(&mut self) {
        let center = self.map.ball_spawn();
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.reset(center, &mut self.rng);
        }
    }

    /// Resize the field, scaling positions and re-anchoring paddles
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring resize to {width}x{height}");
            return;
        }

        let new_map = GameMap::new(width, height);
        let scale = self.map.scale_to(&new_map);
        self.config.field_width = width;
        self.config.field_height = height;

        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            let x = self.config.paddle_x(paddle.side, width);
            paddle.set_position(Vec2::new(x, paddle.pos.y * scale.y));
            paddle.clamp_to_field(height);
        }
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.pos *= scale;
        }

        log::debug!(
            "Resized field {}x{} -> {width}x{height}",
            self.map.width,
            self.map.height
        );
        self.map = new_map;
    }

    /// Replace the ball wholesale
    pub fn set_ball(&mut self, ball: Ball) {
        if let Ok(mut current) = self.world.get::<&mut Ball>(self.ball) {
            *current = ball;
        }
    }

    pub fn set_ball_position(&mut self, pos: Vec2) {
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.pos = pos;
        }
    }

    pub fn set_paddle_y(&mut self, side: Side, y: f32) {
        let height = self.map.height;
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddle_entity(side)) {
            paddle.pos.y = y;
            paddle.clamp_to_field(height);
        }
    }

    /// Replace the paddle on `side` wholesale, kept inside the field
    pub fn set_paddle(&mut self, side: Side, mut paddle: Paddle) {
        paddle.side = side;
        paddle.clamp_to_field(self.map.height);
        if let Ok(mut current) = self.world.get::<&mut Paddle>(self.paddle_entity(side)) {
            *current = paddle;
        }
    }

    /// Adopt authoritative scores
    pub fn sync_scores(&mut self, human: u32, opponent: u32) {
        for (side, score) in [(Side::Left, human), (Side::Right, opponent)] {
            if let Ok(mut player) = self.world.get::<&mut Player>(self.paddle_entity(side)) {
                player.sync_score(score);
            }
        }
    }

    /// Adopt an authoritative phase and match clock
    ///
    /// `remaining_ms` is mapped onto the local clock so
    /// [`Match::remaining_ms`] agrees with the authority at `now`.
    pub fn sync_clock(&mut self, now: u64, phase: MatchPhase, remaining_ms: u64) {
        if self.fsm.is_ended() {
            return;
        }

        let from = self.fsm.phase();
        if from != phase {
            self.fsm.sync(phase);
            self.events.push(GameEvent::PhaseChanged { from, to: phase });
            if phase != MatchPhase::Countdown {
                self.countdown = None;
            }
            if phase == MatchPhase::Ended {
                let (human, opponent) = self.scores();
                self.outcome = Some(Outcome::from_scores(human, opponent));
            }
        }

        if matches!(
            phase,
            MatchPhase::Running | MatchPhase::Paused | MatchPhase::Ended
        ) {
            let elapsed = self.config.match_duration_ms.saturating_sub(remaining_ms);
            self.started_at = Some(now.saturating_sub(elapsed));
        }
    }
}

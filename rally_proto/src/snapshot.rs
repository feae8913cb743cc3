//! Versioned snapshot schema, one record per entity.
//!
//! The host captures a [`MatchSnapshot`] from its canonical match and the
//! client reconciles from the same type.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use rally_core::{Ball, BallPhysics, Match, MatchPhase, Paddle, Player, Side};

use crate::MatchId;

/// Bumped whenever a snapshot field changes
pub const SNAPSHOT_VERSION: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
    pub radius: f32,
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_growth: f32,
    pub min_horizontal_speed: f32,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            dx: ball.vel.x,
            dy: ball.vel.y,
            speed: ball.speed,
            radius: ball.radius,
            initial_speed: ball.physics.initial_speed,
            max_speed: ball.physics.max_speed,
            speed_growth: ball.physics.speed_growth,
            min_horizontal_speed: ball.physics.min_horizontal_speed,
        }
    }
}

impl BallSnapshot {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn physics(&self) -> BallPhysics {
        BallPhysics {
            initial_speed: self.initial_speed,
            max_speed: self.max_speed,
            speed_growth: self.speed_growth,
            min_horizontal_speed: self.min_horizontal_speed,
        }
    }

    /// Rebuild a ball, keeping the snapshot's speed even if it disagrees
    /// with the velocity magnitude
    pub fn to_ball(&self) -> Ball {
        let mut ball = Ball::new(self.position(), self.radius, self.physics());
        ball.vel = Vec2::new(self.dx, self.dy);
        ball.speed = self.speed;
        ball
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl From<&Paddle> for PaddleSnapshot {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.pos.x,
            y: paddle.pos.y,
            width: paddle.width,
            height: paddle.height,
            speed: paddle.speed,
        }
    }
}

impl PaddleSnapshot {
    pub fn to_paddle(&self, side: Side) -> Paddle {
        Paddle::new(
            side,
            Vec2::new(self.x, self.y),
            self.width,
            self.height,
            self.speed,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub score: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            score: player.score(),
        }
    }
}

/// Authoritative state of one match at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub version: u16,
    /// Increases by one per snapshot the host sends for this match
    pub seq: u64,
    pub match_id: MatchId,
    pub difficulty: String,
    pub phase: MatchPhase,
    pub remaining_ms: u64,
    pub field_width: f32,
    pub field_height: f32,
    pub ball: BallSnapshot,
    pub left_paddle: PaddleSnapshot,
    pub right_paddle: PaddleSnapshot,
    pub human: PlayerSnapshot,
    pub opponent: PlayerSnapshot,
}

impl MatchSnapshot {
    pub fn capture(game: &Match, match_id: MatchId, seq: u64, now: u64) -> Self {
        let (human_score, opponent_score) = game.scores();
        let player = |side: Side, score: u32| {
            game.player(side)
                .map(|p| PlayerSnapshot::from(&p))
                .unwrap_or_else(|| PlayerSnapshot {
                    name: String::new(),
                    score,
                })
        };

        Self {
            version: SNAPSHOT_VERSION,
            seq,
            match_id,
            difficulty: game.difficulty().to_string(),
            phase: game.phase(),
            remaining_ms: game.remaining_ms(now),
            field_width: game.map().width,
            field_height: game.map().height,
            ball: BallSnapshot::from(&game.ball()),
            left_paddle: PaddleSnapshot::from(&game.paddle(Side::Left)),
            right_paddle: PaddleSnapshot::from(&game.paddle(Side::Right)),
            human: player(Side::Left, human_score),
            opponent: player(Side::Right, opponent_score),
        }
    }
}

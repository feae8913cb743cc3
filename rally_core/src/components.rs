use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::map::Aabb;
use crate::params::Params;
use crate::resources::GameRng;

/// Which end of the field an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human, defends the left edge
    Left,
    /// Scripted opponent, defends the right edge
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Decoded movement intent for a paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Up,
    Down,
    #[default]
    Hold,
}

/// Movement intent component, present only on human-driven paddles
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub intent: Intent,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fixed ball constants for one match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_growth: f32,
    pub min_horizontal_speed: f32,
}

impl Default for BallPhysics {
    fn default() -> Self {
        Self {
            initial_speed: 5.0,
            max_speed: Params::BALL_SPEED_MAX,
            speed_growth: Params::BALL_SPEED_GROWTH,
            min_horizontal_speed: Params::BALL_MIN_HORIZONTAL_SPEED,
        }
    }
}

/// Ball component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub physics: BallPhysics,
}

impl Ball {
    /// Ball at `pos` heading straight right at the initial speed
    pub fn new(pos: Vec2, radius: f32, physics: BallPhysics) -> Self {
        Self {
            pos,
            vel: Vec2::new(physics.initial_speed, 0.0),
            radius,
            speed: physics.initial_speed,
            physics,
        }
    }

    /// Ball served from `center` in a random direction
    pub fn served(center: Vec2, radius: f32, physics: BallPhysics, rng: &mut GameRng) -> Self {
        let mut ball = Self::new(center, radius, physics);
        ball.reset(center, rng);
        ball
    }

    /// Replace the velocity, keeping `speed` consistent with it
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.speed = vel.length();
        self
    }

    /// Integrate one tick
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Reflect off a paddle, steering by where the ball struck it
    ///
    /// A hit at the paddle centre leaves horizontally, a hit at either end
    /// leaves at 45°. Speed grows by the configured multiplier up to the cap.
    pub fn bounce_paddle(&mut self, paddle_y: f32, paddle_height: f32) {
        let half = paddle_height / 2.0;
        let relative = ((self.pos.y - (paddle_y + half)) / half).clamp(-1.0, 1.0);
        let angle = relative * Params::MAX_BOUNCE_ANGLE;

        let physics = self.physics;
        self.speed = (self.speed * physics.speed_growth)
            .min(physics.max_speed)
            .max(physics.min_horizontal_speed);

        let direction = -self.vel.x.signum();
        let mut dx = direction * self.speed * angle.cos();
        let mut dy = self.speed * angle.sin();

        // Keep rallies moving: never leave nearly vertical
        if dx.abs() < physics.min_horizontal_speed {
            dx = physics.min_horizontal_speed.copysign(dx);
            dy = (self.speed * self.speed - dx * dx).max(0.0).sqrt().copysign(dy);
        }

        self.vel = Vec2::new(dx, dy);
    }

    /// Reset ball to `center` with a random direction at the initial speed
    pub fn reset(&mut self, center: Vec2, rng: &mut GameRng) {
        self.pos = center;
        self.speed = self.physics.initial_speed;

        let angle: f32 = rng
            .0
            .gen_range(-Params::MAX_BOUNCE_ANGLE..=Params::MAX_BOUNCE_ANGLE);
        let mut dx = self.speed * angle.cos();
        if rng.0.gen_bool(0.5) {
            dx = -dx;
        }

        self.vel = Vec2::new(dx, self.speed * angle.sin());
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }

    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.aabb().overlaps(other)
    }
}

/// Paddle component. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            side,
            pos,
            width,
            height,
            speed,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Keep the paddle fully inside a field of the given height
    pub fn clamp_to_field(&mut self, field_height: f32) {
        self.pos.y = self.pos.y.clamp(0.0, (field_height - self.height).max(0.0));
    }

    pub fn move_up(&mut self, field_height: f32) {
        self.pos.y -= self.speed;
        self.clamp_to_field(field_height);
    }

    pub fn move_down(&mut self, field_height: f32) {
        self.pos.y += self.speed;
        self.clamp_to_field(field_height);
    }

    /// Step toward `target_y`, reacting with probability `reaction_probability`
    ///
    /// Returns whether the paddle moved.
    pub fn move_towards_target(
        &mut self,
        target_y: f32,
        field_height: f32,
        reaction_probability: f32,
        rng: &mut GameRng,
    ) -> bool {
        let chance = f64::from(reaction_probability.clamp(0.0, 1.0));
        if !rng.0.gen_bool(chance) {
            return false;
        }

        let difference = target_y - self.center_y();
        if difference.abs() <= Params::AI_DEAD_ZONE {
            return false;
        }

        let before = self.pos.y;
        if difference > 0.0 {
            self.move_down(field_height);
        } else {
            self.move_up(field_height);
        }
        self.pos.y != before
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Player component, attached to the paddle entity it controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    score: u32,
}

impl Player {
    pub const MAX_NAME_LEN: usize = 50;

    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let len = name.chars().count();
        if len > Self::MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                len,
                max: Self::MAX_NAME_LEN,
            });
        }
        Ok(Self {
            name: name.to_string(),
            score: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Adopt an authoritative score
    pub fn sync_score(&mut self, score: u32) {
        self.score = score;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} points", self.name, self.score)
    }
}

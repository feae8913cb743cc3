use serde::{Deserialize, Serialize};

use crate::components::{BallPhysics, Side};
use crate::params::Params;

/// Game configuration
///
/// Every field falls back to its [`Params`] value when missing, so a host can
/// load a partial JSON override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub human_paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_max: f32,
    pub ball_speed_growth: f32,
    pub ball_min_horizontal_speed: f32,
    pub wall_snap: f32,
    pub paddle_snap: f32,
    pub points_to_win: u32,
    pub match_duration_ms: u64,
    pub countdown_step_ms: u64,
    pub countdown_go_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            human_paddle_speed: Params::HUMAN_PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_growth: Params::BALL_SPEED_GROWTH,
            ball_min_horizontal_speed: Params::BALL_MIN_HORIZONTAL_SPEED,
            wall_snap: Params::WALL_SNAP,
            paddle_snap: Params::PADDLE_SNAP,
            points_to_win: Params::POINTS_TO_WIN,
            match_duration_ms: Params::MATCH_DURATION_MS,
            countdown_step_ms: Params::COUNTDOWN_STEP_MS,
            countdown_go_ms: Params::COUNTDOWN_GO_MS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get X position (left edge) for the paddle on a side
    pub fn paddle_x(&self, side: Side, field_width: f32) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => field_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Clamp paddle top edge to the field
    pub fn clamp_paddle_y(&self, y: f32, field_height: f32) -> f32 {
        y.clamp(0.0, (field_height - self.paddle_height).max(0.0))
    }

    /// Ball constants for a given launch speed
    pub fn ball_physics(&self, initial_speed: f32) -> BallPhysics {
        BallPhysics {
            initial_speed,
            max_speed: self.ball_speed_max,
            speed_growth: self.ball_speed_growth,
            min_horizontal_speed: self.ball_min_horizontal_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left, 800.0), 50.0, "Left paddle X");
        assert_eq!(config.paddle_x(Side::Right, 800.0), 735.0, "Right paddle X");
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_y(-20.0, 600.0), 0.0);
        assert_eq!(config.clamp_paddle_y(1000.0, 600.0), 500.0);
        assert_eq!(config.clamp_paddle_y(250.0, 600.0), 250.0);
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "points_to_win": 5 }"#).unwrap();
        assert_eq!(config.points_to_win, 5);
        assert_eq!(config.field_width, Params::FIELD_WIDTH);
        assert_eq!(config.match_duration_ms, Params::MATCH_DURATION_MS);
    }
}

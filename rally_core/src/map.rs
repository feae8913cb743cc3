use glam::Vec2;

use crate::components::Side;
use crate::config::Config;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Bounding box of a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only touch along an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.min.x, self.max.x),
            center.y.clamp(self.min.y, self.max.y),
        );
        (center - closest).length_squared() < radius * radius
    }
}

/// Playing field dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
}

impl GameMap {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.field_width, config.field_height)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(0.0, 0.0, self.width, self.height)
    }

    /// Ball serve point (field centre)
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Top-left corner of a vertically centred paddle
    pub fn paddle_spawn(&self, side: Side, config: &Config) -> Vec2 {
        Vec2::new(
            config.paddle_x(side, self.width),
            (self.height - config.paddle_height) / 2.0,
        )
    }

    /// Per-axis factors that map this field onto `other`
    pub fn scale_to(&self, other: &GameMap) -> Vec2 {
        Vec2::new(other.width / self.width, other.height / self.height)
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let touching = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        let inside = Aabb::from_rect(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_circle_box_matches_radius() {
        let aabb = Aabb::from_circle(Vec2::new(400.0, 300.0), 10.0);
        assert_eq!(aabb.min, Vec2::new(390.0, 290.0));
        assert_eq!(aabb.max, Vec2::new(410.0, 310.0));
        assert_eq!(aabb.center(), Vec2::new(400.0, 300.0));
        assert_eq!(aabb.width(), 20.0);
    }

    #[test]
    fn test_intersects_circle() {
        let paddle = Aabb::from_rect(735.0, 250.0, 15.0, 100.0);
        assert!(paddle.intersects_circle(Vec2::new(730.0, 300.0), 10.0));
        assert!(!paddle.intersects_circle(Vec2::new(700.0, 300.0), 10.0));
        // Corner: box overlap but the circle misses
        assert!(!paddle.intersects_circle(Vec2::new(727.0, 242.0), 10.0));
    }

    #[test]
    fn test_spawns() {
        let config = Config::new();
        let map = GameMap::from_config(&config);
        assert_eq!(map.ball_spawn(), Vec2::new(400.0, 300.0));
        assert_eq!(map.paddle_spawn(Side::Left, &config), Vec2::new(50.0, 250.0));
        assert_eq!(
            map.paddle_spawn(Side::Right, &config),
            Vec2::new(735.0, 250.0)
        );
        assert!(map.bounds().contains(map.ball_spawn()));
    }
}

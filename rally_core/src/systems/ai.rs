use hecs::World;

use crate::components::{Ball, Paddle, Side};
use crate::map::GameMap;
use crate::resources::GameRng;

/// Scripted opponent: chase the ball's centre with the profile's reaction odds
///
/// Returns whether the opponent paddle moved this tick.
pub fn drive_opponent(
    world: &mut World,
    map: &GameMap,
    reaction_probability: f32,
    rng: &mut GameRng,
) -> bool {
    let target_y = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => ball.pos.y,
        None => return false,
    };

    let mut moved = false;
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Right {
            moved |= paddle.move_towards_target(target_y, map.height, reaction_probability, rng);
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, BallPhysics, Config, Player};
    use glam::Vec2;

    fn setup_world(ball_y: f32) -> (World, GameMap, hecs::Entity) {
        let config = Config::new();
        let map = GameMap::from_config(&config);
        let mut world = World::new();
        let paddle = Paddle::new(
            Side::Right,
            map.paddle_spawn(Side::Right, &config),
            15.0,
            100.0,
            6.0,
        );
        let opponent = create_paddle(&mut world, paddle, Player::new("Computer").unwrap());
        let human = Paddle::new(Side::Left, map.paddle_spawn(Side::Left, &config), 15.0, 100.0, 7.0);
        create_paddle(&mut world, human, Player::new("Ana").unwrap());
        create_ball(
            &mut world,
            Ball::new(Vec2::new(400.0, ball_y), 10.0, BallPhysics::default()),
        );
        (world, map, opponent)
    }

    #[test]
    fn test_opponent_chases_ball() {
        let (mut world, map, opponent) = setup_world(500.0);
        let mut rng = GameRng::new(3);

        assert!(drive_opponent(&mut world, &map, 1.0, &mut rng));
        assert_eq!(world.get::<&Paddle>(opponent).unwrap().pos.y, 256.0);
    }

    #[test]
    fn test_opponent_holds_inside_dead_zone() {
        let (mut world, map, opponent) = setup_world(304.0);
        let mut rng = GameRng::new(3);

        assert!(!drive_opponent(&mut world, &map, 1.0, &mut rng));
        assert_eq!(world.get::<&Paddle>(opponent).unwrap().pos.y, 250.0);
    }

    #[test]
    fn test_human_paddle_is_never_driven() {
        let (mut world, map, _opponent) = setup_world(0.0);
        let mut rng = GameRng::new(3);
        drive_opponent(&mut world, &map, 1.0, &mut rng);

        let human_y = world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == Side::Left)
            .map(|(_e, p)| p.pos.y);
        assert_eq!(human_y, Some(250.0));
    }

    #[test]
    fn test_reaction_rate_is_statistical() {
        let mut rng = GameRng::new(2024);
        let mut moves = 0;
        for _ in 0..1000 {
            let (mut world, map, _opponent) = setup_world(500.0);
            if drive_opponent(&mut world, &map, 0.6, &mut rng) {
                moves += 1;
            }
        }
        assert!((520..=680).contains(&moves), "moved {moves} of 1000");
    }
}

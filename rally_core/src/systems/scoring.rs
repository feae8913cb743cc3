use hecs::World;

use crate::components::{Ball, Paddle, Player, Side};
use crate::map::GameMap;
use crate::player_scores;
use crate::resources::{Events, GameEvent, GameRng};

/// Check if ball left the field through either end
///
/// When `award_points` is false the ball is still re-served but no score
/// changes; a mirrored match takes scores from the authority instead.
pub fn check_scoring(
    world: &mut World,
    map: &GameMap,
    events: &mut Events,
    rng: &mut GameRng,
    award_points: bool,
) {
    let mut scorers = Vec::new();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.x < 0.0 {
            scorers.push(Side::Right);
            ball.reset(map.ball_spawn(), rng);
        }
        if ball.pos.x > map.width {
            scorers.push(Side::Left);
            ball.reset(map.ball_spawn(), rng);
        }
    }

    if !award_points {
        return;
    }

    for side in scorers {
        for (_entity, (paddle, player)) in world.query_mut::<(&Paddle, &mut Player)>() {
            if paddle.side == side {
                player.add_point();
            }
        }

        let (human_score, opponent_score) = player_scores(world);
        log::info!("{side:?} scores ({human_score}-{opponent_score})");
        events.push(GameEvent::Scored {
            side,
            human_score,
            opponent_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, BallPhysics, Config};
    use glam::Vec2;

    fn setup_world() -> (World, GameMap, Events, GameRng) {
        let config = Config::new();
        let map = GameMap::from_config(&config);
        let mut world = World::new();
        for (side, name) in [(Side::Left, "Ana"), (Side::Right, "Computer")] {
            let paddle = Paddle::new(side, map.paddle_spawn(side, &config), 15.0, 100.0, 7.0);
            create_paddle(&mut world, paddle, Player::new(name).unwrap());
        }
        (world, map, Events::new(), GameRng::new(12345))
    }

    fn spawn_ball(world: &mut World, x: f32, vx: f32) -> hecs::Entity {
        let ball = Ball::new(Vec2::new(x, 300.0), 10.0, BallPhysics::default())
            .with_velocity(Vec2::new(vx, 0.0));
        create_ball(world, ball)
    }

    #[test]
    fn test_opponent_scores_when_ball_exits_left() {
        let (mut world, map, mut events, mut rng) = setup_world();
        spawn_ball(&mut world, -0.1, -8.0);

        check_scoring(&mut world, &map, &mut events, &mut rng, true);

        assert_eq!(player_scores(&world), (0, 1));
        assert_eq!(
            events.drain(),
            vec![GameEvent::Scored {
                side: Side::Right,
                human_score: 0,
                opponent_score: 1
            }]
        );
    }

    #[test]
    fn test_human_scores_when_ball_exits_right() {
        let (mut world, map, mut events, mut rng) = setup_world();
        spawn_ball(&mut world, map.width + 0.1, 8.0);

        check_scoring(&mut world, &map, &mut events, &mut rng, true);

        assert_eq!(player_scores(&world), (1, 0));
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (mut world, map, mut events, mut rng) = setup_world();
        let entity = spawn_ball(&mut world, -0.1, -11.0);

        check_scoring(&mut world, &map, &mut events, &mut rng, true);

        let ball = *world.get::<&Ball>(entity).unwrap();
        assert_eq!(ball.pos, map.ball_spawn());
        assert_eq!(ball.speed, ball.physics.initial_speed);
    }

    #[test]
    fn test_edge_positions_do_not_score() {
        let (mut world, map, mut events, mut rng) = setup_world();
        let entity = spawn_ball(&mut world, 0.0, -8.0);

        check_scoring(&mut world, &map, &mut events, &mut rng, true);
        world.get::<&mut Ball>(entity).unwrap().pos.x = map.width;
        check_scoring(&mut world, &map, &mut events, &mut rng, true);

        assert_eq!(player_scores(&world), (0, 0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_mirror_resets_ball_without_points() {
        let (mut world, map, mut events, mut rng) = setup_world();
        let entity = spawn_ball(&mut world, -0.1, -8.0);

        check_scoring(&mut world, &map, &mut events, &mut rng, false);

        assert_eq!(player_scores(&world), (0, 0));
        assert_eq!(world.get::<&Ball>(entity).unwrap().pos, map.ball_spawn());
        assert!(events.is_empty());
    }

    #[test]
    fn test_wall_bounce_and_exit_in_same_tick() {
        let (mut world, map, mut events, mut rng) = setup_world();
        let config = Config::new();
        let ball = Ball::new(Vec2::new(-3.0, 5.0), 10.0, BallPhysics::default())
            .with_velocity(Vec2::new(-5.0, -3.0));
        create_ball(&mut world, ball);

        crate::systems::check_collisions(&mut world, &map, &config, &mut events);
        check_scoring(&mut world, &map, &mut events, &mut rng, true);

        assert_eq!(player_scores(&world), (0, 1));
        assert_eq!(
            events.drain(),
            vec![
                GameEvent::WallBounce,
                GameEvent::Scored {
                    side: Side::Right,
                    human_score: 0,
                    opponent_score: 1
                }
            ]
        );
    }
}

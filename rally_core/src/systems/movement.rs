use hecs::World;

use crate::components::{Ball, Intent, Paddle, PaddleIntent};
use crate::map::GameMap;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, map: &GameMap) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        match intent.intent {
            Intent::Up => paddle.move_up(map.height),
            Intent::Down => paddle.move_down(map.height),
            Intent::Hold => {}
        }
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, BallPhysics, Config, Player, Side};
    use glam::Vec2;

    #[test]
    fn test_paddle_follows_intent_and_stays_in_field() {
        let mut world = World::new();
        let map = GameMap::from_config(&Config::new());
        let entity = create_paddle(
            &mut world,
            Paddle::new(Side::Left, Vec2::new(50.0, 4.0), 15.0, 100.0, 7.0),
            Player::new("Ana").unwrap(),
        );

        world.get::<&mut PaddleIntent>(entity).unwrap().intent = Intent::Up;
        move_paddles(&mut world, &map);
        assert_eq!(world.get::<&Paddle>(entity).unwrap().pos.y, 0.0);

        world.get::<&mut PaddleIntent>(entity).unwrap().intent = Intent::Down;
        move_paddles(&mut world, &map);
        assert_eq!(world.get::<&Paddle>(entity).unwrap().pos.y, 7.0);

        world.get::<&mut PaddleIntent>(entity).unwrap().intent = Intent::Hold;
        move_paddles(&mut world, &map);
        assert_eq!(world.get::<&Paddle>(entity).unwrap().pos.y, 7.0);
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut world = World::new();
        let ball = Ball::new(Vec2::new(400.0, 300.0), 10.0, BallPhysics::default())
            .with_velocity(Vec2::new(-3.0, 4.0));
        let entity = create_ball(&mut world, ball);

        move_ball(&mut world);

        assert_eq!(world.get::<&Ball>(entity).unwrap().pos, Vec2::new(397.0, 304.0));
    }
}

use hecs::World;

use crate::components::{Ball, Paddle, Side};
use crate::config::Config;
use crate::map::GameMap;
use crate::resources::{Events, GameEvent};

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, map: &GameMap, config: &Config, events: &mut Events) {
    // Collect paddles up front, left first, so the ball query holds the only borrow
    let mut paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
    paddles.sort_by_key(|p| p.side != Side::Left);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        check_walls(ball, map, config, events);

        for paddle in &paddles {
            check_paddle(ball, paddle, config, events);
        }
    }
}

/// Top/bottom walls: reflect and snap back inside the field
fn check_walls(ball: &mut Ball, map: &GameMap, config: &Config, events: &mut Events) {
    let touches_top = ball.pos.y - ball.radius <= 0.0;
    let touches_bottom = ball.pos.y + ball.radius >= map.height;
    if !touches_top && !touches_bottom {
        return;
    }

    ball.bounce_y();
    if touches_top {
        ball.pos.y = ball.radius + config.wall_snap;
    }
    if touches_bottom {
        ball.pos.y = map.height - ball.radius - config.wall_snap;
    }
    events.push(GameEvent::WallBounce);
}

/// Reflect off `paddle` when overlapping it and travelling toward it
fn check_paddle(ball: &mut Ball, paddle: &Paddle, config: &Config, events: &mut Events) {
    let approaching = match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    if !approaching || !ball.collides_with(&paddle.aabb()) {
        return;
    }

    ball.bounce_paddle(paddle.pos.y, paddle.height);
    ball.pos.x = match paddle.side {
        Side::Left => paddle.right() + ball.radius + config.paddle_snap,
        Side::Right => paddle.left() - ball.radius - config.paddle_snap,
    };
    events.push(GameEvent::PaddleHit { side: paddle.side });
}

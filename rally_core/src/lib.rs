pub mod components;
pub mod config;
pub mod countdown;
pub mod difficulty;
pub mod error;
pub mod fsm;
pub mod game;
pub mod map;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use countdown::*;
pub use difficulty::*;
pub use error::*;
pub use fsm::*;
pub use game::*;
pub use map::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one resolver tick of the deterministic rally simulation
///
/// Terminal evaluation and the opponent controller run after this, see
/// [`Match::tick`].
pub fn step(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    intent: Intent,
    events: &mut Events,
    rng: &mut GameRng,
    award_points: bool,
) {
    // 1. Ingest the human intent and move that paddle
    ingest_intent(world, intent);
    move_paddles(world, map);

    // 2. Move ball
    move_ball(world);

    // 3. Walls, then left and right paddles
    check_collisions(world, map, config, events);

    // 4. Check scoring (ball left the field)
    check_scoring(world, map, events, rng, award_points);
}

/// Helper to create a paddle entity; left paddles take human intent
pub fn create_paddle(world: &mut World, paddle: Paddle, player: Player) -> hecs::Entity {
    match paddle.side {
        Side::Left => world.spawn((paddle, player, PaddleIntent::new())),
        Side::Right => world.spawn((paddle, player)),
    }
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

/// Current ball, if one exists
pub fn find_ball(world: &World) -> Option<Ball> {
    world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)
}

/// Current paddle on `side`
pub fn find_paddle(world: &World, side: Side) -> Option<Paddle> {
    world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, paddle)| paddle.side == side)
        .map(|(_e, paddle)| *paddle)
}

/// (human, opponent) scores
pub fn player_scores(world: &World) -> (u32, u32) {
    let mut scores = (0, 0);
    for (_e, (paddle, player)) in world.query::<(&Paddle, &Player)>().iter() {
        match paddle.side {
            Side::Left => scores.0 = player.score(),
            Side::Right => scores.1 = player.score(),
        }
    }
    scores
}

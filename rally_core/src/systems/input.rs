use hecs::World;

use crate::components::{Intent, PaddleIntent};

/// Store this tick's decoded intent on every human-driven paddle
pub fn ingest_intent(world: &mut World, intent: Intent) {
    for (_entity, paddle_intent) in world.query_mut::<&mut PaddleIntent>() {
        paddle_intent.intent = intent;
    }
}

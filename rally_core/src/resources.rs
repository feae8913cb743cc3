use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::fsm::MatchPhase;

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    OpponentWins,
    Draw,
}

impl Outcome {
    /// Strict score comparison, equal scores draw
    pub fn from_scores(human: u32, opponent: u32) -> Self {
        match human.cmp(&opponent) {
            std::cmp::Ordering::Greater => Outcome::HumanWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::HumanWins => Some(Side::Left),
            Outcome::OpponentWins => Some(Side::Right),
            Outcome::Draw => None,
        }
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GameEvent {
    /// Ball bounced off the paddle on `side`
    PaddleHit { side: Side },
    WallBounce,
    /// `side` won a point; scores are after the point
    Scored {
        side: Side,
        human_score: u32,
        opponent_score: u32,
    },
    /// Countdown step began: 3, 2, 1, then 0 for "Go"
    CountdownStep { remaining: u8 },
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    MatchEnded {
        outcome: Outcome,
        human_score: u32,
        opponent_score: u32,
    },
}

/// Events queued since the last drain
#[derive(Debug, Clone, Default)]
pub struct Events {
    queue: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn contains(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.queue.iter().any(predicate)
    }
}

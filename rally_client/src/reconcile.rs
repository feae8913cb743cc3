//! Merging authoritative snapshots into the locally predicted match

use std::collections::VecDeque;

use rally_core::{Config, GameMap, Match, Side, ValidationError};
use rally_proto::{MatchId, MatchSnapshot};

/// Snapshot inbox plus the merge rules
///
/// Snapshots are queued as they arrive and applied together at the start
/// of the next frame, so a tick never sees a half-merged entity.
#[derive(Debug, Default)]
pub struct Reconciler {
    match_id: Option<MatchId>,
    last_seq: Option<u64>,
    inbox: VecDeque<MatchSnapshot>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only snapshots for `match_id` are accepted from now on
    pub fn expect_match(&mut self, match_id: MatchId) {
        self.match_id = Some(match_id);
        self.last_seq = None;
        self.inbox.clear();
    }

    pub fn match_id(&self) -> Option<MatchId> {
        self.match_id
    }

    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Queue a snapshot; returns false if it belongs to another match
    pub fn push(&mut self, snapshot: MatchSnapshot) -> bool {
        if self.match_id != Some(snapshot.match_id) {
            log::warn!(
                "Ignoring snapshot for match {} (expecting {:?})",
                snapshot.match_id,
                self.match_id.map(|id| id.to_string())
            );
            return false;
        }
        self.inbox.push_back(snapshot);
        true
    }

    /// Apply queued snapshots oldest first, returning how many were applied
    pub fn drain_into(&mut self, game: &mut Option<Match>, now: u64) -> usize {
        let mut applied = 0;

        while let Some(snapshot) = self.inbox.pop_front() {
            if self.last_seq.is_some_and(|last| snapshot.seq <= last) {
                log::debug!("Dropping stale snapshot seq={}", snapshot.seq);
                continue;
            }

            match game {
                Some(existing) => merge(existing, &snapshot, now),
                None => match build(&snapshot, now) {
                    Ok(built) => *game = Some(built),
                    Err(e) => {
                        log::warn!("Cannot build match from snapshot: {e}");
                        continue;
                    }
                },
            }

            self.last_seq = Some(snapshot.seq);
            applied += 1;
        }

        applied
    }
}

/// Construct the local mirror from a first snapshot
///
/// Every entity is taken from the snapshot as sent, so a host running
/// non-default settings is mirrored exactly.
pub fn build(snapshot: &MatchSnapshot, now: u64) -> Result<Match, ValidationError> {
    let ball = snapshot.ball.to_ball();
    let config = Config {
        field_width: snapshot.field_width,
        field_height: snapshot.field_height,
        paddle_width: snapshot.left_paddle.width,
        paddle_height: snapshot.left_paddle.height,
        paddle_margin: snapshot.left_paddle.x,
        human_paddle_speed: snapshot.left_paddle.speed,
        ball_radius: ball.radius,
        ball_speed_max: ball.physics.max_speed,
        ball_speed_growth: ball.physics.speed_growth,
        ball_min_horizontal_speed: ball.physics.min_horizontal_speed,
        ..Config::default()
    };

    let mut game = Match::new(
        &snapshot.human.name,
        &snapshot.difficulty,
        config,
        seed_for(&snapshot.match_id),
    )?
    .into_mirror();

    game.set_ball(ball);
    game.set_paddle(Side::Left, snapshot.left_paddle.to_paddle(Side::Left));
    game.set_paddle(Side::Right, snapshot.right_paddle.to_paddle(Side::Right));
    game.sync_scores(snapshot.human.score, snapshot.opponent.score);
    game.sync_clock(now, snapshot.phase, snapshot.remaining_ms);
    Ok(game)
}

/// Overwrite the authoritative fields, leaving local motion alone
///
/// Ball position, opponent paddle and scores come from the snapshot. The
/// human paddle and the ball's velocity stay as predicted.
pub fn merge(game: &mut Match, snapshot: &MatchSnapshot, now: u64) {
    let source = GameMap::new(snapshot.field_width, snapshot.field_height);
    let scale = source.scale_to(game.map());

    game.set_ball_position(snapshot.ball.position() * scale);
    game.set_paddle_y(Side::Right, snapshot.right_paddle.y * scale.y);
    game.sync_scores(snapshot.human.score, snapshot.opponent.score);
    game.sync_clock(now, snapshot.phase, snapshot.remaining_ms);
}

fn seed_for(match_id: &MatchId) -> u64 {
    match_id
        .as_str()
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

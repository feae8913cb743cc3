//! Headless match runner: a scripted human plays one match against the
//! computer through the full host/client round trip.
//!
//! Usage:
//!   cargo run -p rally_server --bin rally-sim -- --difficulty hard --seed 7
//!   RUST_LOG=debug cargo run -p rally_server --bin rally-sim

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use rally_client::{handle_bytes, ClientError, ClientGame, MemoryStore};
use rally_core::{Config, Intent, Side};
use rally_proto::{ProtoError, SessionError};
use rally_server::{Environment, Lobby, ManualClock, QueueClient};

/// Display frame interval
const TICK_MS: u64 = 16;

/// The scripted human ignores the ball while it is this close to the paddle centre
const TRACKING_SLACK: f32 = 10.0;

#[derive(Parser)]
#[command(name = "rally-sim")]
#[command(about = "Play one headless match against the computer opponent")]
struct Args {
    /// Name of the scripted human player
    #[arg(long, default_value = "Player")]
    name: String,

    /// Opponent difficulty: easy, normal, hard or expert
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Seed for match codes and serves
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON file overriding field and rule settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up after this much simulated time
    #[arg(long, default_value_t = 300)]
    max_seconds: u64,
}

#[derive(Error, Debug)]
enum SimError {
    #[error("cannot read {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Proto(#[from] ProtoError),

    #[error("match still running after {0}s of simulated time")]
    Timeout(u64),
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, SimError> {
    let Some(path) = path else {
        return Ok(Config::new());
    };
    let text = std::fs::read_to_string(path).map_err(|source| SimError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Chase the ball's height with the human paddle
fn scripted_intent(client: &ClientGame) -> Intent {
    let (Some(ball), Some(paddle)) = (client.ball(), client.paddle(Side::Left)) else {
        return Intent::Hold;
    };
    let offset = ball.pos.y - paddle.center_y();
    if offset < -TRACKING_SLACK {
        Intent::Up
    } else if offset > TRACKING_SLACK {
        Intent::Down
    } else {
        Intent::Hold
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = load_config(args.config.as_ref())?;
    let clock = ManualClock::new(0);
    let mut lobby = Lobby::new(Box::new(clock.clone()), config, args.seed);
    let mut store = MemoryStore::new();
    let mut client = ClientGame::new();

    let match_id = client.setup(
        &mut lobby,
        &mut store,
        Some(&args.name),
        Some(&args.difficulty),
        clock.now(),
    )?;
    let link = QueueClient::new();
    lobby.connect(&match_id, Box::new(link.clone()))?;
    client.request_start(&mut lobby, clock.now())?;
    println!("Match {match_id}: {} vs Computer ({})", args.name.trim(), args.difficulty);

    let deadline = args.max_seconds.saturating_mul(1_000);
    loop {
        let now = clock.advance(TICK_MS);

        if let Some(msg) = client.frame(now, scripted_intent(&client)) {
            lobby.handle_bytes(&match_id, &msg.to_bytes()?)?;
        }
        lobby.tick();
        for frame in link.drain() {
            handle_bytes(&frame, &mut client)?;
        }

        if client.result().is_some() {
            break;
        }
        if now >= deadline {
            return Err(SimError::Timeout(args.max_seconds));
        }
    }

    if let Some(result) = client.result() {
        println!(
            "{:?}: {} - {} after {:.1}s",
            result.outcome,
            result.human_score,
            result.opponent_score,
            clock.now() as f64 / 1000.0
        );
    }
    lobby.prune_finished();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("rally-sim: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Display client for rally matches
//!
//! Predicts the match locally and reconciles against authoritative
//! snapshots pushed by the host.

pub mod error;
pub mod fsm;
pub mod game;
pub mod network;
pub mod preferences;
pub mod reconcile;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::*;
pub use fsm::*;
pub use game::*;
pub use network::*;
pub use preferences::*;
pub use reconcile::Reconciler;

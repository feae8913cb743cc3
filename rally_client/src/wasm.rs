//! Browser bindings
//!
//! The page owns the socket and the canvas; it forwards server frames in,
//! sends the returned frames out and reads positions back for drawing.

use rally_core::{Intent, Side};
use rally_proto::MatchId;
use wasm_bindgen::prelude::*;

use crate::fsm::SessionState;
use crate::game::ClientGame;
use crate::network::{encode_events, handle_bytes};

#[wasm_bindgen]
pub struct WasmClient {
    game: ClientGame,
}

#[wasm_bindgen]
impl WasmClient {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: ClientGame::new(),
        }
    }

    /// Returns the join frame to send, or an error for a malformed code
    pub fn join(&mut self, code: &str) -> Result<Vec<u8>, JsValue> {
        let match_id =
            MatchId::parse(code).ok_or_else(|| JsValue::from_str("match code must be 5 characters"))?;
        self.game
            .join(match_id)
            .to_bytes()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn receive(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        handle_bytes(bytes, &mut self.game).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `dir`: -1 up, 1 down, anything else holds. Returns a frame to send
    /// when the intent changed.
    pub fn frame(&mut self, now_ms: f64, dir: i8) -> Option<Vec<u8>> {
        let intent = match dir {
            -1 => Intent::Up,
            1 => Intent::Down,
            _ => Intent::Hold,
        };
        let msg = self.game.frame(now_ms as u64, intent)?;
        msg.to_bytes().ok()
    }

    pub fn toggle_pause(&mut self) -> Option<Vec<u8>> {
        self.game.toggle_pause()?.to_bytes().ok()
    }

    pub fn focus_lost(&mut self) -> Option<Vec<u8>> {
        self.game.focus_lost()?.to_bytes().ok()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    #[wasm_bindgen(getter)]
    pub fn session_state(&self) -> SessionState {
        self.game.session_state()
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    /// [x, y, radius]
    pub fn ball(&self) -> Vec<f32> {
        self.game
            .ball()
            .map(|b| vec![b.pos.x, b.pos.y, b.radius])
            .unwrap_or_default()
    }

    /// [x, y, width, height] for the human (left) or opponent paddle
    pub fn paddle(&self, left: bool) -> Vec<f32> {
        let side = if left { Side::Left } else { Side::Right };
        self.game
            .paddle(side)
            .map(|p| vec![p.pos.x, p.pos.y, p.width, p.height])
            .unwrap_or_default()
    }

    pub fn scores(&self) -> Vec<u32> {
        let (human, opponent) = self.game.scores();
        vec![human, opponent]
    }

    pub fn remaining_seconds(&self, now_ms: f64) -> u32 {
        self.game
            .remaining_ms(now_ms as u64)
            .map_or(0, |ms| (ms / 1000) as u32)
    }

    /// Every event since the last call, oldest first, as a JSON array of
    /// objects tagged by `kind`
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        encode_events(&self.game.drain_events()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmClient {
    fn default() -> Self {
        Self::new()
    }
}

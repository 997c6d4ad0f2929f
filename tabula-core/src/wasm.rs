//! WASM bindings for tabula-core
//!
//! Provides a JavaScript-friendly API around [`Game`]. Cells are passed in
//! the board's own notation (`"e2"`, `"f5"`); results come back as JS values.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::variants::{by_name, ChessOptions};
use crate::{Color, Game, GameError, Position};

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

impl WasmGame {
    fn cell(&self, name: &str) -> Result<Position, JsValue> {
        self.inner
            .board()
            .topology()
            .parse(name)
            .ok_or_else(|| JsValue::from_str(&format!("not a cell: {name}")))
    }
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a game of `"chess"`, `"hex"` or `"checkers"`
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, king_safety: Option<bool>) -> Result<WasmGame, JsValue> {
        let options = ChessOptions {
            king_safety: king_safety.unwrap_or(false),
        };
        let rules = by_name(variant, options).map_err(to_js)?;
        let inner = Game::new(rules).map_err(to_js)?;
        Ok(WasmGame { inner })
    }

    /// Play a move. Returns the applied move.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, from: &str, to: &str) -> Result<JsValue, JsValue> {
        let (from, to) = (self.cell(from)?, self.cell(to)?);
        let mv = self.inner.submit_move(from, to).map_err(to_js)?;
        to_value(&mv)
    }

    /// Take back `count` moves
    pub fn rollback(&mut self, count: usize) -> Result<(), JsValue> {
        self.inner.rollback(count).map(|_| ()).map_err(to_js)
    }

    /// Re-apply `count` rolled-back moves
    pub fn redo(&mut self, count: usize) -> Result<(), JsValue> {
        self.inner.redo(count).map(|_| ()).map_err(to_js)
    }

    /// Board snapshot: { width, height, cells: [{ position, label, column, row, piece }] }
    #[wasm_bindgen(js_name = boardView)]
    pub fn board_view(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.board_view())
    }

    /// Legal destinations of the piece on `from`, as cell names
    pub fn candidates(&self, from: &str) -> Result<Vec<String>, JsValue> {
        let from = self.cell(from)?;
        let topology = self.inner.board().topology();
        let legal = self.inner.legal_destinations(from).map_err(to_js)?;
        Ok(legal.into_iter().map(|p| topology.label(p)).collect())
    }

    /// Side to move: "White" or "Black"
    #[wasm_bindgen(js_name = activeColor)]
    pub fn active_color(&self) -> String {
        self.inner.active_color().to_string()
    }

    /// Completed half-moves
    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> usize {
        self.inner.move_count()
    }

    /// Applied moves, oldest first
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.history().moves())
    }

    /// Winner as "White"/"Black", or null while the game is running
    pub fn winner(&self) -> Option<String> {
        self.inner.outcome().map(|o| o.winner().to_string())
    }

    /// Resign for the side to move
    pub fn resign(&mut self) -> Result<(), JsValue> {
        let color: Color = self.inner.active_color();
        self.inner.resign(color).map(|_| ()).map_err(to_js)
    }
}

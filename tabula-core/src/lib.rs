//! Rule validation and move history for turn-based two-player board games.
//!
//! The engine never picks a move. It checks the moves each side supplies,
//! applies them, and keeps a history that can be rolled back and redone.
//!
//! # Layers
//!
//! ```text
//! Position / Offset    coordinates and direction vectors
//! Topology             which cells exist, directions, cell names
//! Piece + Movement     what a piece kind can reach
//! Board                occupancy, all-or-nothing apply/undo
//! Move / MoveHistory   reversible records, cursor for rollback/redo
//! VariantRules         piece set, layout and special-rule hooks
//! Game                 two-step turn controller
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tabula_core::{Game, Position, StandardChess};
//!
//! let mut game = Game::new(Arc::new(StandardChess::default())).unwrap();
//! game.submit_move(Position::new(4, 1), Position::new(4, 3)).unwrap();
//! assert_eq!(game.move_count(), 1);
//! game.rollback(1).unwrap();
//! assert_eq!(game.move_count(), 0);
//! ```

pub mod board;
pub mod color;
pub mod error;
pub mod game;
pub mod history;
pub mod moves;
pub mod pieces;
pub mod position;
pub mod topology;
pub mod variants;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::Board;
pub use color::Color;
pub use error::{GameError, GameResult};
pub use game::{Game, GameState, Outcome, Phase};
pub use history::MoveHistory;
pub use moves::{Capture, Move, MoveFlags};
pub use pieces::{Movement, Piece, PieceKind};
pub use position::{Offset, Position};
pub use topology::{HexGrid, SquareGrid, Topology};
pub use variants::{by_name, ChessOptions, Checkers, HexChess, StandardChess, VariantRules};
pub use view::{BoardView, Cell, ViewCell};

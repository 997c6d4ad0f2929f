//! Error types for the engine.
//!
//! Every variant is recoverable: an operation that returns an error leaves
//! the game state exactly as it was before the call.

use thiserror::Error;

use crate::color::Color;
use crate::game::Outcome;
use crate::position::Position;

/// Errors reported by the board, the move history and the turn controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No piece of the side to move at the claimed origin
    #[error("no {color} piece at {at}")]
    InvalidSelection { at: Position, color: Color },

    /// Destination is not reachable by the selected piece
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// Coordinate outside the board topology
    #[error("position {at} is outside the board")]
    OutOfBounds { at: Position },

    /// More moves requested for rollback than have been played
    #[error("cannot roll back {requested} moves, only {available} recorded")]
    RollbackUnderflow { requested: usize, available: usize },

    /// More moves requested for redo than remain after the last rollback
    #[error("cannot redo {requested} moves, only {available} available")]
    RedoUnavailable { requested: usize, available: usize },

    /// The variant's post-move check refused the move
    #[error("move from {from} to {to} rejected: {reason}")]
    RuleViolation {
        from: Position,
        to: Position,
        reason: String,
    },

    /// A destination was given before any origin was selected
    #[error("no piece selected")]
    NoSelection,

    /// Moves are refused once the game has finished
    #[error("the game is over: {0}")]
    GameOver(Outcome),

    /// A move does not fit the current board occupancy
    #[error("move does not match the board: {reason}")]
    MoveMismatch { reason: String },

    /// Two pieces placed on the same cell during setup
    #[error("two pieces placed at {at}")]
    DuplicatePlacement { at: Position },

    /// Variant name not recognised
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// Result type alias for engine operations
pub type GameResult<T> = Result<T, GameError>;

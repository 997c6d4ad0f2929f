//! Game variants.
//!
//! A [`VariantRules`] bundles everything that differs between games: the
//! board shape, the starting layout, which movement each piece kind has, and
//! the hooks for capture removal, promotion, post-move checks and game end.
//! The turn controller only ever talks to this trait, so a new variant never
//! needs changes elsewhere.

mod checkers;
mod hex;
mod standard;

pub use checkers::Checkers;
pub use hex::HexChess;
pub use standard::StandardChess;

use std::fmt::Debug;
use std::sync::Arc;

use crate::board::Board;
use crate::color::Color;
use crate::error::{GameError, GameResult};
use crate::game::Outcome;
use crate::moves::{Capture, Move};
use crate::pieces::{attacked_by, chess, Movement, Piece, PieceKind};
use crate::position::Position;
use crate::topology::Topology;

/// Piece set, board shape and special-rule hooks of one game.
pub trait VariantRules: Debug + Send + Sync {
    /// Short name, e.g. `"chess"`.
    fn name(&self) -> &str;

    fn topology(&self) -> Arc<dyn Topology>;

    /// Pieces on the board before the first move.
    fn initial_layout(&self) -> Vec<(Position, Piece)>;

    fn first_to_move(&self) -> Color {
        Color::White
    }

    /// Movement of a piece kind. Kinds without one cannot move.
    fn movement(&self, kind: PieceKind) -> Option<&dyn Movement>;

    /// Display character: upper case for White, lower case for Black.
    fn symbol(&self, piece: Piece) -> char {
        let letter = piece.kind.letter();
        match piece.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Pieces removed when `piece` moves from `origin` to `destination`.
    ///
    /// Default is displacement: an opposing piece on the destination.
    fn captures(&self, piece: Piece, origin: Position, destination: Position, board: &Board) -> Vec<Capture> {
        let _ = origin;
        match board.piece_at(destination) {
            Some(target) if target.color != piece.color => vec![Capture {
                piece: target,
                at: destination,
            }],
            _ => Vec::new(),
        }
    }

    /// Kind the piece turns into on arrival, if any.
    fn promotion(&self, piece: Piece, destination: Position) -> Option<PieceKind> {
        let _ = (piece, destination);
        None
    }

    /// Check the board after a move. An `Err` carries the reason the move
    /// is refused; the move is then taken back.
    fn check_move(&self, board_after: &Board, mv: &Move) -> Result<(), String> {
        let _ = (board_after, mv);
        Ok(())
    }

    /// Decide the game with `to_move` about to play, if it is over.
    fn outcome(&self, board: &Board, to_move: Color) -> Option<Outcome> {
        let _ = (board, to_move);
        None
    }
}

/// Switches shared by the chess variants.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ChessOptions {
    /// Refuse moves that leave the mover's own king attacked
    pub king_safety: bool,
}

/// Names accepted by [`by_name`].
pub const VARIANT_NAMES: [&str; 3] = ["chess", "hex", "checkers"];

/// Build a variant from its short name.
pub fn by_name(name: &str, options: ChessOptions) -> GameResult<Arc<dyn VariantRules>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "chess" => Ok(Arc::new(StandardChess::new(options))),
        "hex" => Ok(Arc::new(HexChess::new(options))),
        "checkers" => Ok(Arc::new(Checkers)),
        _ => Err(GameError::UnknownVariant(name.to_string())),
    }
}

// ============================================================================
// Shared chess pieces
// ============================================================================

/// Movements of the six chess kinds.
fn chess_movement(kind: PieceKind) -> Option<&'static dyn Movement> {
    match kind {
        PieceKind::King => Some(&chess::King),
        PieceKind::Queen => Some(&chess::Queen),
        PieceKind::Rook => Some(&chess::Rook),
        PieceKind::Bishop => Some(&chess::Bishop),
        PieceKind::Knight => Some(&chess::Knight),
        PieceKind::Pawn => Some(&chess::Pawn),
        _ => None,
    }
}

/// Refuse a move that leaves any king of the mover attacked.
pub fn king_safety(board_after: &Board, mv: &Move, rules: &dyn VariantRules) -> Result<(), String> {
    let color = mv.piece().color;
    let exposed = board_after
        .pieces()
        .filter(|(_, p)| p.kind == PieceKind::King && p.color == color)
        .any(|(pos, _)| attacked_by(board_after, pos, color.opponent(), rules));
    if exposed {
        Err(format!("{color} king would be under attack"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        for name in VARIANT_NAMES {
            let rules = by_name(name, ChessOptions::default()).unwrap();
            assert_eq!(rules.name(), name);
        }
        assert_eq!(by_name(" Chess ", ChessOptions::default()).unwrap().name(), "chess");
        assert_eq!(
            by_name("go", ChessOptions::default()).unwrap_err(),
            GameError::UnknownVariant("go".to_string())
        );
    }

    #[test]
    fn test_default_symbols() {
        let rules = StandardChess::new(ChessOptions::default());
        assert_eq!(rules.symbol(Piece::new(PieceKind::Knight, Color::White)), 'N');
        assert_eq!(rules.symbol(Piece::new(PieceKind::Queen, Color::Black)), 'q');
    }

    #[test]
    fn test_layouts_fit_their_boards() {
        for name in VARIANT_NAMES {
            let rules = by_name(name, ChessOptions::default()).unwrap();
            let board = Board::with_layout(rules.topology(), rules.initial_layout());
            assert!(board.is_ok(), "{name}");
        }
    }
}

//! Gliński's hexagonal chess on the 91-cell board.

use std::sync::Arc;

use super::{chess_movement, king_safety, ChessOptions, VariantRules};
use crate::board::Board;
use crate::color::Color;
use crate::moves::Move;
use crate::pieces::{Movement, Piece, PieceKind};
use crate::position::Position;
use crate::topology::{HexGrid, Topology};

/// White's setup; Black's mirrors it along each file.
const WHITE_SETUP: [(&str, PieceKind); 18] = [
    ("g1", PieceKind::King),
    ("e1", PieceKind::Queen),
    ("f1", PieceKind::Bishop),
    ("f2", PieceKind::Bishop),
    ("f3", PieceKind::Bishop),
    ("d1", PieceKind::Knight),
    ("h1", PieceKind::Knight),
    ("c1", PieceKind::Rook),
    ("i1", PieceKind::Rook),
    ("b1", PieceKind::Pawn),
    ("c2", PieceKind::Pawn),
    ("d3", PieceKind::Pawn),
    ("e4", PieceKind::Pawn),
    ("f5", PieceKind::Pawn),
    ("g4", PieceKind::Pawn),
    ("h3", PieceKind::Pawn),
    ("i2", PieceKind::Pawn),
    ("k1", PieceKind::Pawn),
];

/// Hexagonal chess with the standard piece set and hex directions.
#[derive(Clone, Debug, Default)]
pub struct HexChess {
    options: ChessOptions,
}

impl HexChess {
    pub fn new(options: ChessOptions) -> HexChess {
        HexChess { options }
    }

    /// Flip a cell to the other end of its file: the lowest and highest
    /// ranks of file `f` always sum to `15 - f`.
    #[inline]
    fn mirror(pos: Position) -> Position {
        Position::new(pos.file, 15 - pos.file - pos.rank)
    }
}

impl VariantRules for HexChess {
    fn name(&self) -> &str {
        "hex"
    }

    fn topology(&self) -> Arc<dyn Topology> {
        Arc::new(HexGrid)
    }

    fn initial_layout(&self) -> Vec<(Position, Piece)> {
        let mut layout = Vec::with_capacity(WHITE_SETUP.len() * 2);
        for (name, kind) in WHITE_SETUP {
            let pos = HexGrid::cell(name);
            layout.push((pos, Piece::new(kind, Color::White)));
            layout.push((Self::mirror(pos), Piece::new(kind, Color::Black)));
        }
        layout
    }

    fn movement(&self, kind: PieceKind) -> Option<&dyn Movement> {
        chess_movement(kind)
    }

    fn check_move(&self, board_after: &Board, mv: &Move) -> Result<(), String> {
        if self.options.king_safety {
            king_safety(board_after, mv, self)
        } else {
            Ok(())
        }
    }
}

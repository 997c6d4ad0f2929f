//! Classic chess on the 8×8 board.

use std::sync::Arc;

use super::{chess_movement, king_safety, ChessOptions, VariantRules};
use crate::board::Board;
use crate::color::Color;
use crate::moves::Move;
use crate::pieces::{Movement, Piece, PieceKind};
use crate::position::Position;
use crate::topology::{SquareGrid, Topology};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Standard chess without castling, en passant or promotion.
#[derive(Clone, Debug, Default)]
pub struct StandardChess {
    options: ChessOptions,
}

impl StandardChess {
    pub fn new(options: ChessOptions) -> StandardChess {
        StandardChess { options }
    }
}

impl VariantRules for StandardChess {
    fn name(&self) -> &str {
        "chess"
    }

    fn topology(&self) -> Arc<dyn Topology> {
        Arc::new(SquareGrid::standard())
    }

    fn initial_layout(&self) -> Vec<(Position, Piece)> {
        let mut layout = Vec::with_capacity(32);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            layout.push((Position::new(file, 0), Piece::new(kind, Color::White)));
            layout.push((Position::new(file, 1), Piece::new(PieceKind::Pawn, Color::White)));
            layout.push((Position::new(file, 6), Piece::new(PieceKind::Pawn, Color::Black)));
            layout.push((Position::new(file, 7), Piece::new(kind, Color::Black)));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let rules = StandardChess::default();
        let board = Board::with_layout(rules.topology(), rules.initial_layout()).unwrap();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.piece_at(Position::new(4, 0)), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(Position::new(3, 7)), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.piece_at(Position::new(0, 6)), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert!(board.is_empty(Position::new(4, 3)));
    }

    #[test]
    fn test_opening_candidates() {
        let rules = StandardChess::default();
        let board = Board::with_layout(rules.topology(), rules.initial_layout()).unwrap();
        let total: usize = board
            .pieces()
            .filter(|(_, p)| p.color == Color::White)
            .map(|(pos, p)| p.candidate_destinations(pos, &board, &rules).len())
            .sum();
        // 16 pawn moves and 4 knight moves
        assert_eq!(total, 20);
    }

    #[test]
    fn test_king_safety_hook() {
        let grid: Arc<dyn Topology> = Arc::new(SquareGrid::standard());
        let king = Piece::new(PieceKind::King, Color::White);
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let layout = [(Position::new(4, 0), king), (Position::new(7, 1), rook)];
        let mut board = Board::with_layout(grid, layout).unwrap();

        // Ke1-e2 walks onto the rook's rank
        let mv = Move::new(Position::new(4, 0), Position::new(4, 1), king);
        board.apply_move(&mv).unwrap();

        let lenient = StandardChess::default();
        let strict = StandardChess::new(ChessOptions { king_safety: true });
        assert!(lenient.check_move(&board, &mv).is_ok());
        assert!(strict.check_move(&board, &mv).is_err());
    }
}

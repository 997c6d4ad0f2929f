//! Checkers on the 8×8 board.
//!
//! Men start on the dark squares (a1 is dark) of the three rows nearest
//! each side. Jumps remove every piece passed over and a man reaching the
//! far row is crowned. Capturing is allowed but never forced.
//!
//! A move names only its origin and landing square, so when several jump
//! chains end on the same square the shortest one found is played. A longer
//! chain to that square cannot be chosen.

use std::sync::Arc;

use super::VariantRules;
use crate::board::Board;
use crate::color::Color;
use crate::game::Outcome;
use crate::moves::Capture;
use crate::pieces::checkers::{jump_paths, CrownedKing, Man};
use crate::pieces::{Movement, Piece, PieceKind};
use crate::position::Position;
use crate::topology::{SquareGrid, Topology};

/// English draughts movement on a standard board.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checkers;

impl Checkers {
    const ROWS: i8 = 3;

    fn grid() -> SquareGrid {
        SquareGrid::standard()
    }
}

impl VariantRules for Checkers {
    fn name(&self) -> &str {
        "checkers"
    }

    fn topology(&self) -> Arc<dyn Topology> {
        Arc::new(Self::grid())
    }

    fn initial_layout(&self) -> Vec<(Position, Piece)> {
        let grid = Self::grid();
        let top = grid.height() as i8 - 1;
        grid.positions()
            .into_iter()
            .filter(|pos| (pos.file + pos.rank) % 2 == 0)
            .filter_map(|pos| {
                if pos.rank < Self::ROWS {
                    Some((pos, Piece::new(PieceKind::Man, Color::White)))
                } else if pos.rank > top - Self::ROWS {
                    Some((pos, Piece::new(PieceKind::Man, Color::Black)))
                } else {
                    None
                }
            })
            .collect()
    }

    fn movement(&self, kind: PieceKind) -> Option<&dyn Movement> {
        match kind {
            PieceKind::Man => Some(&Man),
            PieceKind::CrownedKing => Some(&CrownedKing),
            _ => None,
        }
    }

    /// `w`/`b` for men, `W`/`B` for crowned kings.
    fn symbol(&self, piece: Piece) -> char {
        let letter = match piece.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        match piece.kind {
            PieceKind::CrownedKing => letter.to_ascii_uppercase(),
            _ => letter,
        }
    }

    /// Every piece jumped on the way; a plain step captures nothing.
    fn captures(&self, piece: Piece, origin: Position, destination: Position, board: &Board) -> Vec<Capture> {
        let paths = jump_paths(piece, origin, board);
        let Some(jumped) = paths.get(&destination) else {
            return Vec::new();
        };
        jumped
            .iter()
            .filter_map(|&at| board.piece_at(at).map(|piece| Capture { piece, at }))
            .collect()
    }

    fn promotion(&self, piece: Piece, destination: Position) -> Option<PieceKind> {
        let crowned = piece.kind == PieceKind::Man && Self::grid().is_last_rank(destination, piece.color);
        crowned.then_some(PieceKind::CrownedKing)
    }

    /// The side to move loses with no pieces left or no piece able to move.
    fn outcome(&self, board: &Board, to_move: Color) -> Option<Outcome> {
        let can_move = board
            .pieces()
            .filter(|(_, p)| p.color == to_move)
            .any(|(pos, p)| !p.candidate_destinations(pos, board, self).is_empty());
        if can_move {
            None
        } else {
            Some(Outcome::Decided {
                winner: to_move.opponent(),
            })
        }
    }
}

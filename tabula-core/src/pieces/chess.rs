//! The six chess movements.
//!
//! All directions come from the board's topology, so the same movements
//! serve the square and the hexagonal board.

use std::collections::BTreeSet;

use super::{leap, slide, Movement, Piece};
use crate::board::Board;
use crate::position::Position;
use crate::variants::VariantRules;

/// Slides along ranks and files.
pub struct Rook;

/// Slides along diagonals.
pub struct Bishop;

/// Slides along ranks, files and diagonals.
pub struct Queen;

/// Leaps to the topology's knight offsets.
pub struct Knight;

/// One step in any orthogonal or diagonal direction.
pub struct King;

/// Base pawn: no promotion, no en passant.
pub struct Pawn;

impl Movement for Rook {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let mut out = BTreeSet::new();
        slide(piece, origin, board, board.topology().orthogonals(), &mut out);
        out
    }
}

impl Movement for Bishop {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let mut out = BTreeSet::new();
        slide(piece, origin, board, board.topology().diagonals(), &mut out);
        out
    }
}

impl Movement for Queen {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let topology = board.topology();
        let mut out = BTreeSet::new();
        slide(piece, origin, board, topology.orthogonals(), &mut out);
        slide(piece, origin, board, topology.diagonals(), &mut out);
        out
    }
}

impl Movement for Knight {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let mut out = BTreeSet::new();
        leap(piece, origin, board, board.topology().leaps(), &mut out);
        out
    }
}

impl Movement for King {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let topology = board.topology();
        let mut out = BTreeSet::new();
        leap(piece, origin, board, topology.orthogonals(), &mut out);
        leap(piece, origin, board, topology.diagonals(), &mut out);
        out
    }
}

impl Movement for Pawn {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let topology = board.topology();
        let ahead = topology.forward(piece.color);
        let mut out = BTreeSet::new();

        // Straight ahead only onto empty squares, never a capture
        if let Some(one) = topology.step(origin, ahead).filter(|p| board.is_empty(*p)) {
            out.insert(one);
            if topology.is_pawn_start(origin, piece.color) {
                if let Some(two) = topology.step(one, ahead).filter(|p| board.is_empty(*p)) {
                    out.insert(two);
                }
            }
        }

        // Slanting forward only onto opposing pieces
        for &dir in topology.forward_diagonals(piece.color) {
            if let Some(target) = topology.step(origin, dir) {
                if board.piece_at(target).is_some_and(|other| other.color != piece.color) {
                    out.insert(target);
                }
            }
        }

        out
    }
}

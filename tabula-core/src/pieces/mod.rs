//! Pieces and their movement capabilities.
//!
//! A [`Piece`] is a plain value: a kind and a color. What a piece can do is
//! described by a [`Movement`], which the active variant hands out for each
//! kind. Pieces never know where they stand; the board is asked instead.

pub mod checkers;
pub mod chess;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::color::Color;
use crate::position::{Offset, Position};
use crate::variants::VariantRules;

/// Identity of a piece type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    /// Uncrowned checkers piece
    Man,
    /// Crowned checkers piece
    CrownedKing,
    /// Variant-defined piece, resolved through `VariantRules::movement`
    Custom(u8),
}

impl PieceKind {
    /// Conventional letter (upper case), `?` for custom kinds.
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
            PieceKind::Man => 'M',
            PieceKind::CrownedKing => 'C',
            PieceKind::Custom(_) => '?',
        }
    }
}

/// A colored piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Squares this piece could move to from `origin` on `board`.
    ///
    /// Kinds the variant has no movement for cannot move at all.
    pub fn candidate_destinations(
        self,
        origin: Position,
        board: &Board,
        rules: &dyn VariantRules,
    ) -> BTreeSet<Position> {
        rules
            .movement(self.kind)
            .map(|m| m.destinations(self, origin, board, rules))
            .unwrap_or_default()
    }

    /// Same piece with another kind (promotion).
    #[inline]
    pub fn with_kind(self, kind: PieceKind) -> Piece {
        Piece { kind, color: self.color }
    }
}

/// The one capability every piece type implements.
///
/// Implementations must only return positions on the board that are empty
/// or hold an opposing piece, and must not mutate anything.
pub trait Movement: Send + Sync {
    fn destinations(
        &self,
        piece: Piece,
        origin: Position,
        board: &Board,
        rules: &dyn VariantRules,
    ) -> BTreeSet<Position>;
}

// ============================================================================
// Shared geometry
// ============================================================================

/// Walk each direction until blocked. The first occupied square is taken
/// only when it holds an opposing piece.
pub fn slide(piece: Piece, origin: Position, board: &Board, directions: &[Offset], out: &mut BTreeSet<Position>) {
    let topology = board.topology();
    for &dir in directions {
        let mut cursor = origin;
        while let Some(next) = topology.step(cursor, dir) {
            match board.piece_at(next) {
                None => {
                    out.insert(next);
                    cursor = next;
                }
                Some(other) => {
                    if other.color != piece.color {
                        out.insert(next);
                    }
                    break;
                }
            }
        }
    }
}

/// Test each fixed offset: on the board and not held by the same side.
pub fn leap(piece: Piece, origin: Position, board: &Board, offsets: &[Offset], out: &mut BTreeSet<Position>) {
    let topology = board.topology();
    for &offset in offsets {
        if let Some(target) = topology.step(origin, offset) {
            if board.piece_at(target).map_or(true, |other| other.color != piece.color) {
                out.insert(target);
            }
        }
    }
}

/// Check if any piece of `by` could move onto `target`.
pub fn attacked_by(board: &Board, target: Position, by: Color, rules: &dyn VariantRules) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .any(|(pos, piece)| piece.candidate_destinations(pos, board, rules).contains(&target))
}

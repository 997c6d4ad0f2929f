//! Move records.
//!
//! A [`Move`] carries everything needed to apply it and to take it back:
//! the moved piece, every piece it removes together with the square it was
//! removed from, and any promotion. Once built it is never modified.
//!
//! # Flag Encoding (8-bit)
//!
//! ```text
//! Bit 0: capture
//! Bit 1: promotion
//! Bit 2: castle      (reserved for extensions)
//! Bit 3: en passant  (reserved for extensions)
//! ```

use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, PieceKind};
use crate::position::Position;
use crate::topology::Topology;

/// Special-rule markers on a move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1 << 0);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 1);
    pub const CASTLE: MoveFlags = MoveFlags(1 << 2);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 3);

    /// Check if every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[inline]
    pub const fn with(self, other: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | other.0)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::fmt::Debug for MoveFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (MoveFlags::CAPTURE, "CAPTURE"),
            (MoveFlags::PROMOTION, "PROMOTION"),
            (MoveFlags::CASTLE, "CASTLE"),
            (MoveFlags::EN_PASSANT, "EN_PASSANT"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "MoveFlags({})", set.join(" | "))
    }
}

/// A piece removed from the board by a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub piece: Piece,
    /// Square the piece stood on (the destination for ordinary captures,
    /// the jumped square in checkers).
    pub at: Position,
}

/// One reversible state transition.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    origin: Position,
    destination: Position,
    piece: Piece,
    captures: Vec<Capture>,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}

impl Move {
    /// A quiet move of `piece` from `origin` to `destination`.
    pub fn new(origin: Position, destination: Position, piece: Piece) -> Move {
        Move {
            origin,
            destination,
            piece,
            captures: Vec::new(),
            promotion: None,
            flags: MoveFlags::NONE,
        }
    }

    /// Add a captured piece.
    pub fn with_capture(mut self, capture: Capture) -> Move {
        self.captures.push(capture);
        self.flags = self.flags.with(MoveFlags::CAPTURE);
        self
    }

    /// The moved piece becomes `kind` on arrival.
    pub fn with_promotion(mut self, kind: PieceKind) -> Move {
        self.promotion = Some(kind);
        self.flags = self.flags.with(MoveFlags::PROMOTION);
        self
    }

    /// Set extension flags (castle, en passant).
    pub fn with_flags(mut self, flags: MoveFlags) -> Move {
        self.flags = self.flags.with(flags);
        self
    }

    #[inline]
    pub fn origin(&self) -> Position {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Position {
        self.destination
    }

    /// The piece as it stood on the origin.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece as it stands on the destination after the move.
    #[inline]
    pub fn placed_piece(&self) -> Piece {
        match self.promotion {
            Some(kind) => self.piece.with_kind(kind),
            None => self.piece,
        }
    }

    #[inline]
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// First captured piece, if any.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captures.first().map(|c| c.piece)
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    /// Short notation using the topology's cell names, e.g. `Ng1-f3`,
    /// `Pe4xd5`, `Mb6-a7=C`.
    pub fn describe(&self, topology: &dyn Topology) -> String {
        let mut text = format!("{}{}", self.piece.kind.letter(), topology.label(self.origin));
        text.push(if self.is_capture() { 'x' } else { '-' });
        text.push_str(&topology.label(self.destination));
        if let Some(kind) = self.promotion {
            text.push('=');
            text.push(kind.letter());
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::topology::SquareGrid;

    const PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    const KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);

    #[test]
    fn test_flags_contains() {
        let flags = MoveFlags::CAPTURE.with(MoveFlags::PROMOTION);
        assert!(flags.contains(MoveFlags::CAPTURE));
        assert!(flags.contains(MoveFlags::PROMOTION));
        assert!(!flags.contains(MoveFlags::CASTLE));
        assert!(flags.contains(MoveFlags::NONE));
        assert_eq!(flags.bits(), 0b11);
    }

    #[test]
    fn test_quiet_move() {
        let m = Move::new(Position::new(4, 1), Position::new(4, 3), PAWN);
        assert!(!m.is_capture());
        assert_eq!(m.captured(), None);
        assert_eq!(m.placed_piece(), PAWN);
        assert_eq!(m.flags(), MoveFlags::NONE);
    }

    #[test]
    fn test_capture_sets_flag() {
        let m = Move::new(Position::new(4, 3), Position::new(3, 4), PAWN).with_capture(Capture {
            piece: KNIGHT,
            at: Position::new(3, 4),
        });
        assert!(m.is_capture());
        assert_eq!(m.captured(), Some(KNIGHT));
        assert_eq!(m.captures().len(), 1);
    }

    #[test]
    fn test_promotion_changes_placed_piece() {
        let m = Move::new(Position::new(0, 6), Position::new(0, 7), PAWN).with_promotion(PieceKind::Queen);
        assert_eq!(m.piece(), PAWN);
        assert_eq!(m.placed_piece(), Piece::new(PieceKind::Queen, Color::White));
        assert!(m.flags().contains(MoveFlags::PROMOTION));
    }

    #[test]
    fn test_describe() {
        let grid = SquareGrid::standard();
        let quiet = Move::new(Position::new(6, 0), Position::new(5, 2), KNIGHT);
        assert_eq!(quiet.describe(&grid), "Ng1-f3");

        let capture = Move::new(Position::new(4, 3), Position::new(3, 4), PAWN).with_capture(Capture {
            piece: KNIGHT,
            at: Position::new(3, 4),
        });
        assert_eq!(capture.describe(&grid), "Pe4xd5");

        let crowning = Move::new(Position::new(1, 5), Position::new(0, 6), PAWN).with_promotion(PieceKind::Queen);
        assert_eq!(crowning.describe(&grid), "Pb6-a7=Q");
    }
}

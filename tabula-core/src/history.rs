//! Move log with rollback and redo.
//!
//! The log keeps every recorded move plus a cursor. Moves before the cursor
//! are on the board; moves after it were rolled back and can be redone until
//! a different move is recorded.

use serde::{Deserialize, Serialize};

use crate::moves::Move;

/// Ordered log of applied moves.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct MoveHistory {
    moves: Vec<Move>,
    applied: usize,
}

/// Unchecked wire form of [`MoveHistory`].
#[derive(Deserialize)]
struct RawHistory {
    moves: Vec<Move>,
    applied: usize,
}

impl TryFrom<RawHistory> for MoveHistory {
    type Error = String;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        if raw.applied > raw.moves.len() {
            return Err(format!(
                "cursor {} is past the {} recorded moves",
                raw.applied,
                raw.moves.len()
            ));
        }
        Ok(MoveHistory {
            moves: raw.moves,
            applied: raw.applied,
        })
    }
}

impl MoveHistory {
    pub fn new() -> MoveHistory {
        MoveHistory::default()
    }

    /// Append an applied move. Replaying the next rolled-back move keeps the
    /// rest of the redo tail; any other move discards it.
    pub fn record(&mut self, mv: Move) {
        if self.moves.get(self.applied) == Some(&mv) {
            self.applied += 1;
            return;
        }
        self.moves.truncate(self.applied);
        self.moves.push(mv);
        self.applied += 1;
    }

    /// Step the cursor back over the last applied move.
    pub fn step_back(&mut self) -> Option<&Move> {
        if self.applied == 0 {
            return None;
        }
        self.applied -= 1;
        self.moves.get(self.applied)
    }

    /// Step the cursor forward over the next rolled-back move.
    pub fn step_forward(&mut self) -> Option<&Move> {
        let mv = self.moves.get(self.applied)?;
        self.applied += 1;
        Some(mv)
    }

    /// Moves currently on the board, oldest first.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves[..self.applied]
    }

    /// Last applied move.
    pub fn last(&self) -> Option<&Move> {
        self.moves().last()
    }

    /// Number of applied moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.applied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.applied == 0
    }

    /// Number of moves available to redo.
    #[inline]
    pub fn redo_len(&self) -> usize {
        self.moves.len() - self.applied
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.applied < self.moves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pieces::{Piece, PieceKind};
    use crate::position::Position;

    fn mv(rank: i8) -> Move {
        Move::new(Position::new(0, rank), Position::new(0, rank + 1), Piece::new(PieceKind::Rook, Color::White))
    }

    #[test]
    fn test_record_and_len() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        assert!(!history.can_undo());

        history.record(mv(0));
        history.record(mv(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&mv(1)));
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_step_back_and_forward() {
        let mut history = MoveHistory::new();
        history.record(mv(0));
        history.record(mv(1));

        assert_eq!(history.step_back(), Some(&mv(1)));
        assert_eq!(history.moves(), &[mv(0)]);
        assert_eq!(history.redo_len(), 1);
        assert!(history.can_redo());

        assert_eq!(history.step_forward(), Some(&mv(1)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.step_forward(), None);
    }

    #[test]
    fn test_step_back_on_empty() {
        let mut history = MoveHistory::new();
        assert_eq!(history.step_back(), None);
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut history = MoveHistory::new();
        history.record(mv(0));
        history.record(mv(1));
        history.step_back();
        history.step_back();

        history.record(mv(4));
        assert_eq!(history.moves(), &[mv(4)]);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_same_move_keeps_redo() {
        let mut history = MoveHistory::new();
        history.record(mv(0));
        history.record(mv(1));
        history.step_back();
        history.step_back();

        history.record(mv(0));
        assert_eq!(history.moves(), &[mv(0)]);
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.step_forward(), Some(&mv(1)));
    }

    #[test]
    fn test_deserialize_checks_cursor() {
        let mut history = MoveHistory::new();
        history.record(mv(0));
        history.step_back();
        let json = serde_json::to_string(&history).unwrap();
        let back: MoveHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);

        let bad = json.replace("\"applied\":0", "\"applied\":5");
        assert_ne!(bad, json);
        let err = serde_json::from_str::<MoveHistory>(&bad).unwrap_err();
        assert!(err.to_string().contains("past the 1 recorded moves"));
    }
}

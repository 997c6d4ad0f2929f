//! Board occupancy.
//!
//! The board maps positions to pieces and owns every piece standing on it.
//! After setup it changes only through [`Board::apply_move`] and
//! [`Board::undo_move`], which check the move against the current occupancy
//! first and then either complete or change nothing.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{GameError, GameResult};
use crate::moves::Move;
use crate::pieces::Piece;
use crate::position::Position;
use crate::topology::Topology;
use crate::view::{BoardView, ViewCell};

/// Grid of cells with at most one piece each.
#[derive(Clone)]
pub struct Board {
    topology: Arc<dyn Topology>,
    cells: BTreeMap<Position, Piece>,
}

impl Board {
    /// An empty board.
    pub fn empty(topology: Arc<dyn Topology>) -> Board {
        Board {
            topology,
            cells: BTreeMap::new(),
        }
    }

    /// A board with the given pieces. Fails on positions outside the
    /// topology or on two pieces sharing a cell.
    pub fn with_layout(
        topology: Arc<dyn Topology>,
        layout: impl IntoIterator<Item = (Position, Piece)>,
    ) -> GameResult<Board> {
        let mut board = Board::empty(topology);
        for (pos, piece) in layout {
            board.place(pos, piece)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn topology(&self) -> &dyn Topology {
        self.topology.as_ref()
    }

    /// Shared handle to the topology.
    pub fn topology_handle(&self) -> Arc<dyn Topology> {
        Arc::clone(&self.topology)
    }

    /// Check that a position exists on this board.
    #[inline]
    pub fn check_bounds(&self, pos: Position) -> GameResult<()> {
        if self.topology.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds { at: pos })
        }
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells.get(&pos).copied()
    }

    /// Check if a cell is empty. Positions off the board count as empty.
    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        !self.cells.contains_key(&pos)
    }

    /// All pieces with their positions, ordered by position.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().map(|(&pos, &piece)| (pos, piece))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.len()
    }

    /// Put a piece on an empty cell (setup only).
    pub fn place(&mut self, pos: Position, piece: Piece) -> GameResult<()> {
        self.check_bounds(pos)?;
        if self.cells.contains_key(&pos) {
            return Err(GameError::DuplicatePlacement { at: pos });
        }
        self.cells.insert(pos, piece);
        Ok(())
    }

    /// Take a piece off the board (setup only).
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells.remove(&pos)
    }

    // ========== Apply & Undo ==========

    /// Apply a move: remove its captures, then relocate the moved piece
    /// (promoted if the move says so).
    ///
    /// Only structure is checked here; whether the move is legal is decided
    /// by the pieces and the turn controller.
    pub fn apply_move(&mut self, mv: &Move) -> GameResult<()> {
        self.check_bounds(mv.origin())?;
        self.check_bounds(mv.destination())?;
        if mv.origin() == mv.destination() {
            return Err(mismatch(format!("origin and destination are both {}", mv.origin())));
        }
        if self.piece_at(mv.origin()) != Some(mv.piece()) {
            return Err(mismatch(format!("{:?} is not on {}", mv.piece(), mv.origin())));
        }
        for capture in mv.captures() {
            self.check_bounds(capture.at)?;
            if self.piece_at(capture.at) != Some(capture.piece) {
                return Err(mismatch(format!("{:?} is not on {}", capture.piece, capture.at)));
            }
        }
        let destination_cleared = mv.captures().iter().any(|c| c.at == mv.destination());
        if !self.is_empty(mv.destination()) && !destination_cleared {
            return Err(mismatch(format!("{} is occupied", mv.destination())));
        }

        for capture in mv.captures() {
            self.cells.remove(&capture.at);
        }
        self.cells.remove(&mv.origin());
        self.cells.insert(mv.destination(), mv.placed_piece());
        Ok(())
    }

    /// Reverse a move applied last: the moved piece returns to its origin
    /// in its original form and every captured piece returns to its square.
    pub fn undo_move(&mut self, mv: &Move) -> GameResult<()> {
        if self.piece_at(mv.destination()) != Some(mv.placed_piece()) {
            return Err(mismatch(format!("{:?} is not on {}", mv.placed_piece(), mv.destination())));
        }
        if !self.is_empty(mv.origin()) {
            return Err(mismatch(format!("{} is occupied", mv.origin())));
        }
        for capture in mv.captures() {
            if capture.at != mv.destination() && !self.is_empty(capture.at) {
                return Err(mismatch(format!("{} is occupied", capture.at)));
            }
        }

        self.cells.remove(&mv.destination());
        self.cells.insert(mv.origin(), mv.piece());
        for capture in mv.captures() {
            self.cells.insert(capture.at, capture.piece);
        }
        Ok(())
    }

    /// Read-only snapshot for renderers.
    pub fn view(&self) -> BoardView {
        let (width, height) = self.topology.screen_size();
        let cells = self
            .topology
            .positions()
            .into_iter()
            .map(|pos| {
                let (column, row) = self.topology.screen_cell(pos);
                ViewCell {
                    position: pos,
                    label: self.topology.label(pos),
                    column,
                    row,
                    piece: self.piece_at(pos),
                }
            })
            .collect();
        BoardView::new(width, height, cells)
    }
}

fn mismatch(reason: String) -> GameError {
    GameError::MoveMismatch { reason }
}

/// Boards are equal when they hold the same pieces on the same cells.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("topology", &self.topology)
            .field("cells", &self.cells)
            .finish()
    }
}

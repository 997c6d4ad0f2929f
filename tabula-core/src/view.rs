//! Read-only board snapshots for renderers.
//!
//! A [`BoardView`] places every cell of the board on a rectangular text
//! grid. Square boards map one-to-one; hex boards stagger their files so
//! some grid cells stay [`Cell::Off`].

use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::position::Position;

/// One on-board cell and where it is drawn.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ViewCell {
    pub position: Position,
    /// Cell name in the board's own notation
    pub label: String,
    pub column: u8,
    /// Screen row, 0 at the top
    pub row: u8,
    pub piece: Option<Piece>,
}

/// What a renderer draws at a grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    /// Not part of the board
    Off,
    Empty,
    Occupied(Piece),
}

/// Snapshot of a board's occupancy.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardView {
    width: u8,
    height: u8,
    cells: Vec<ViewCell>,
}

impl BoardView {
    pub fn new(width: u8, height: u8, cells: Vec<ViewCell>) -> BoardView {
        BoardView { width, height, cells }
    }

    /// Number of grid columns.
    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of grid rows.
    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn cells(&self) -> &[ViewCell] {
        &self.cells
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells.iter().find(|c| c.position == pos).and_then(|c| c.piece)
    }

    /// Grid rows from the top, each `width` cells wide.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        let mut grid = vec![vec![Cell::Off; self.width as usize]; self.height as usize];
        for cell in &self.cells {
            let slot = grid
                .get_mut(cell.row as usize)
                .and_then(|row| row.get_mut(cell.column as usize));
            if let Some(slot) = slot {
                *slot = match cell.piece {
                    Some(piece) => Cell::Occupied(piece),
                    None => Cell::Empty,
                };
            }
        }
        grid.into_iter()
    }
}

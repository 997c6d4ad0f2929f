//! Board shapes.
//!
//! A [`Topology`] knows which positions exist, which direction vectors the
//! standard movements use on it, how its cells are named, and where each
//! cell sits on a text screen. Pieces ask the topology for directions, so a
//! rook written once slides correctly on both square and hexagonal boards.
//!
//! # Hexagonal layout
//!
//! ```text
//! The 91-cell board is stored in axial coordinates inside an 11×11 box:
//!   file = q + 5, rank = s + 5, valid when |q| ≤ 5, |s| ≤ 5, |q + s| ≤ 5
//!
//! (0, +1) runs up a file. Neighbours of a cell:
//!   up (0,1)  down (0,-1)  up-right (1,0)  down-right (1,-1)
//!   up-left (-1,1)  down-left (-1,0)
//!
//! Cells are named Gliński style: files a b c d e f g h i k l (no j),
//! ranks counted from 1 at the bottom of each file.
//! ```

use std::fmt::Debug;

use crate::color::Color;
use crate::position::{Offset, Position};

/// Shape and direction semantics of a board.
pub trait Topology: Debug + Send + Sync {
    /// Check if a position exists on this board.
    fn contains(&self, pos: Position) -> bool;

    /// All positions, ordered by file then rank.
    fn positions(&self) -> Vec<Position>;

    /// One step along each rank/file line (rook directions).
    fn orthogonals(&self) -> &'static [Offset];

    /// One step along each diagonal line (bishop directions).
    fn diagonals(&self) -> &'static [Offset];

    /// Knight jumps.
    fn leaps(&self) -> &'static [Offset];

    /// Straight ahead for the given side.
    fn forward(&self, color: Color) -> Offset;

    /// The two forward-slanting neighbours, used for pawn captures and
    /// checkers men.
    fn forward_diagonals(&self, color: Color) -> &'static [Offset];

    /// Check if a pawn of this color may advance two steps from here.
    fn is_pawn_start(&self, pos: Position, color: Color) -> bool;

    /// Check if a position is on the far edge for the given side.
    fn is_last_rank(&self, pos: Position, color: Color) -> bool;

    /// Human-readable name of a cell. Positions off the board fall back to
    /// their raw coordinates.
    fn label(&self, pos: Position) -> String;

    /// Parse a cell name (case-insensitive). Returns `None` for names that
    /// do not denote a cell of this board.
    fn parse(&self, text: &str) -> Option<Position>;

    /// Size of the text grid renderers draw into, as (columns, rows).
    fn screen_size(&self) -> (u8, u8);

    /// Screen cell of a position, as (column, row) with row 0 at the top.
    fn screen_cell(&self, pos: Position) -> (u8, u8);

    /// Header character for a screen column.
    fn column_label(&self, column: u8) -> char;

    /// Margin label for a screen row, if the shape has numbered rows.
    fn row_label(&self, row: u8) -> Option<String>;

    /// Neighbouring position in a direction, if it is on the board.
    #[inline]
    fn step(&self, pos: Position, by: Offset) -> Option<Position> {
        pos.offset(by).filter(|p| self.contains(*p))
    }
}

// ============================================================================
// Square grid
// ============================================================================

const ORTHOGONALS: [Offset; 4] = [
    Offset { df: 1, dr: 0 },
    Offset { df: -1, dr: 0 },
    Offset { df: 0, dr: 1 },
    Offset { df: 0, dr: -1 },
];

const DIAGONALS: [Offset; 4] = [
    Offset { df: 1, dr: 1 },
    Offset { df: 1, dr: -1 },
    Offset { df: -1, dr: 1 },
    Offset { df: -1, dr: -1 },
];

const KNIGHT_LEAPS: [Offset; 8] = [
    Offset { df: -2, dr: -1 },
    Offset { df: -2, dr: 1 },
    Offset { df: -1, dr: -2 },
    Offset { df: -1, dr: 2 },
    Offset { df: 1, dr: -2 },
    Offset { df: 1, dr: 2 },
    Offset { df: 2, dr: -1 },
    Offset { df: 2, dr: 1 },
];

const WHITE_FORWARD_DIAGONALS: [Offset; 2] = [Offset { df: -1, dr: 1 }, Offset { df: 1, dr: 1 }];
const BLACK_FORWARD_DIAGONALS: [Offset; 2] = [Offset { df: -1, dr: -1 }, Offset { df: 1, dr: -1 }];

/// Rectangular board with files `a..` and ranks `1..`. White starts at
/// rank 1 and moves up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareGrid {
    width: u8,
    height: u8,
}

impl SquareGrid {
    /// Create a grid. Dimensions are clamped to 1..=26 so every file has a
    /// letter.
    pub fn new(width: u8, height: u8) -> SquareGrid {
        SquareGrid {
            width: width.clamp(1, 26),
            height: height.clamp(1, 26),
        }
    }

    /// The 8×8 board.
    pub fn standard() -> SquareGrid {
        SquareGrid::new(8, 8)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }
}

impl Topology for SquareGrid {
    #[inline]
    fn contains(&self, pos: Position) -> bool {
        pos.file >= 0 && pos.rank >= 0 && (pos.file as u8) < self.width && (pos.rank as u8) < self.height
    }

    fn positions(&self) -> Vec<Position> {
        (0..self.width as i8)
            .flat_map(|file| (0..self.height as i8).map(move |rank| Position::new(file, rank)))
            .collect()
    }

    fn orthogonals(&self) -> &'static [Offset] {
        &ORTHOGONALS
    }

    fn diagonals(&self) -> &'static [Offset] {
        &DIAGONALS
    }

    fn leaps(&self) -> &'static [Offset] {
        &KNIGHT_LEAPS
    }

    fn forward(&self, color: Color) -> Offset {
        match color {
            Color::White => Offset::new(0, 1),
            Color::Black => Offset::new(0, -1),
        }
    }

    fn forward_diagonals(&self, color: Color) -> &'static [Offset] {
        match color {
            Color::White => &WHITE_FORWARD_DIAGONALS,
            Color::Black => &BLACK_FORWARD_DIAGONALS,
        }
    }

    fn is_pawn_start(&self, pos: Position, color: Color) -> bool {
        match color {
            Color::White => pos.rank == 1,
            Color::Black => pos.rank == self.height as i8 - 2,
        }
    }

    fn is_last_rank(&self, pos: Position, color: Color) -> bool {
        match color {
            Color::White => pos.rank == self.height as i8 - 1,
            Color::Black => pos.rank == 0,
        }
    }

    fn label(&self, pos: Position) -> String {
        pos.to_string()
    }

    fn parse(&self, text: &str) -> Option<Position> {
        let text = text.trim().to_ascii_lowercase();
        let mut chars = text.chars();
        let file = chars.next()?;
        if !file.is_ascii_lowercase() {
            return None;
        }
        let rank: i8 = chars.as_str().parse().ok()?;
        let pos = Position::new((file as u8 - b'a') as i8, rank.checked_sub(1)?);
        self.contains(pos).then_some(pos)
    }

    fn screen_size(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    fn screen_cell(&self, pos: Position) -> (u8, u8) {
        (pos.file as u8, self.height - 1 - pos.rank as u8)
    }

    fn column_label(&self, column: u8) -> char {
        (b'A' + column) as char
    }

    fn row_label(&self, row: u8) -> Option<String> {
        Some((self.height - row).to_string())
    }
}

// ============================================================================
// Hexagonal grid
// ============================================================================

const HEX_ORTHOGONALS: [Offset; 6] = [
    Offset { df: 0, dr: 1 },
    Offset { df: 1, dr: 0 },
    Offset { df: 1, dr: -1 },
    Offset { df: 0, dr: -1 },
    Offset { df: -1, dr: 0 },
    Offset { df: -1, dr: 1 },
];

/// Sums of adjacent orthogonals.
const HEX_DIAGONALS: [Offset; 6] = [
    Offset { df: 1, dr: 1 },
    Offset { df: 2, dr: -1 },
    Offset { df: 1, dr: -2 },
    Offset { df: -1, dr: -1 },
    Offset { df: -2, dr: 1 },
    Offset { df: -1, dr: 2 },
];

/// The twelve cells at distance three that are not on a straight line.
const HEX_KNIGHT_LEAPS: [Offset; 12] = [
    Offset { df: 1, dr: 2 },
    Offset { df: 2, dr: 1 },
    Offset { df: 3, dr: -1 },
    Offset { df: 3, dr: -2 },
    Offset { df: 2, dr: -3 },
    Offset { df: 1, dr: -3 },
    Offset { df: -1, dr: -2 },
    Offset { df: -2, dr: -1 },
    Offset { df: -3, dr: 1 },
    Offset { df: -3, dr: 2 },
    Offset { df: -2, dr: 3 },
    Offset { df: -1, dr: 3 },
];

const HEX_WHITE_FORWARD_DIAGONALS: [Offset; 2] = [Offset { df: -1, dr: 1 }, Offset { df: 1, dr: 0 }];
const HEX_BLACK_FORWARD_DIAGONALS: [Offset; 2] = [Offset { df: -1, dr: 0 }, Offset { df: 1, dr: -1 }];

/// Gliński file letters.
const HEX_FILES: [char; 11] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'k', 'l'];

/// Regular hexagon of side six (91 cells).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct HexGrid;

impl HexGrid {
    const RADIUS: i8 = 5;

    /// Cell by Gliński file letter and 1-based rank. Panics on names that
    /// are not on the board; meant for constant layouts.
    pub fn cell(name: &str) -> Position {
        HexGrid.parse(name).unwrap_or_else(|| panic!("not a hex cell: {name}"))
    }

    /// Rank offset of a file: files left of the centre start higher up.
    #[inline]
    fn rank_base(file: i8) -> i8 {
        (Self::RADIUS - file).max(0)
    }
}

impl Topology for HexGrid {
    #[inline]
    fn contains(&self, pos: Position) -> bool {
        let q = pos.file as i16 - Self::RADIUS as i16;
        let s = pos.rank as i16 - Self::RADIUS as i16;
        let r = Self::RADIUS as i16;
        q.abs() <= r && s.abs() <= r && (q + s).abs() <= r
    }

    fn positions(&self) -> Vec<Position> {
        (0..=2 * Self::RADIUS)
            .flat_map(|file| (0..=2 * Self::RADIUS).map(move |rank| Position::new(file, rank)))
            .filter(|p| self.contains(*p))
            .collect()
    }

    fn orthogonals(&self) -> &'static [Offset] {
        &HEX_ORTHOGONALS
    }

    fn diagonals(&self) -> &'static [Offset] {
        &HEX_DIAGONALS
    }

    fn leaps(&self) -> &'static [Offset] {
        &HEX_KNIGHT_LEAPS
    }

    fn forward(&self, color: Color) -> Offset {
        match color {
            Color::White => Offset::new(0, 1),
            Color::Black => Offset::new(0, -1),
        }
    }

    fn forward_diagonals(&self, color: Color) -> &'static [Offset] {
        match color {
            Color::White => &HEX_WHITE_FORWARD_DIAGONALS,
            Color::Black => &HEX_BLACK_FORWARD_DIAGONALS,
        }
    }

    /// Pawns start on a chevron: b1 c2 d3 e4 f5 g4 h3 i2 k1 for White and
    /// rank 7 of files b..k for Black.
    fn is_pawn_start(&self, pos: Position, color: Color) -> bool {
        if !(1..=9).contains(&pos.file) {
            return false;
        }
        match color {
            Color::White => pos.rank == 4.min(9 - pos.file),
            Color::Black => pos.rank == 6.max(11 - pos.file),
        }
    }

    fn is_last_rank(&self, pos: Position, color: Color) -> bool {
        let ahead = self.forward(color);
        self.contains(pos) && self.step(pos, ahead).is_none()
    }

    fn label(&self, pos: Position) -> String {
        if !self.contains(pos) {
            return pos.to_string();
        }
        let rank = pos.rank - Self::rank_base(pos.file) + 1;
        format!("{}{}", HEX_FILES[pos.file as usize], rank)
    }

    fn parse(&self, text: &str) -> Option<Position> {
        let text = text.trim().to_ascii_lowercase();
        let mut chars = text.chars();
        let letter = chars.next()?;
        let file = HEX_FILES.iter().position(|&c| c == letter)? as i8;
        let rank: i8 = chars.as_str().parse().ok()?;
        let pos = Position::new(file, Self::rank_base(file).checked_add(rank.checked_sub(1)?)?);
        (rank >= 1 && self.contains(pos)).then_some(pos)
    }

    fn screen_size(&self) -> (u8, u8) {
        (11, 21)
    }

    /// Each file is a column; moving up a file climbs two screen rows and
    /// each file to the right sits half a cell higher.
    fn screen_cell(&self, pos: Position) -> (u8, u8) {
        let height = 2 * pos.rank as i16 + pos.file as i16 - 3 * Self::RADIUS as i16;
        (pos.file as u8, (2 * Self::RADIUS as i16 - height) as u8)
    }

    fn column_label(&self, column: u8) -> char {
        HEX_FILES[column as usize].to_ascii_uppercase()
    }

    fn row_label(&self, _row: u8) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_contains() {
        let grid = SquareGrid::standard();
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(7, 7)));
        assert!(!grid.contains(Position::new(8, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
        assert_eq!(grid.positions().len(), 64);
    }

    #[test]
    fn test_square_parse_label() {
        let grid = SquareGrid::standard();
        assert_eq!(grid.parse("e4"), Some(Position::new(4, 3)));
        assert_eq!(grid.parse("E2"), Some(Position::new(4, 1)));
        assert_eq!(grid.parse("i1"), None);
        assert_eq!(grid.parse("a9"), None);
        assert_eq!(grid.parse("a0"), None);
        assert_eq!(grid.parse("4e"), None);
        assert_eq!(grid.parse(""), None);
        assert_eq!(grid.label(Position::new(7, 7)), "h8");
    }

    #[test]
    fn test_square_screen() {
        let grid = SquareGrid::standard();
        // a8 is top-left, h1 is bottom-right
        assert_eq!(grid.screen_cell(Position::new(0, 7)), (0, 0));
        assert_eq!(grid.screen_cell(Position::new(7, 0)), (7, 7));
        assert_eq!(grid.row_label(0).as_deref(), Some("8"));
        assert_eq!(grid.column_label(2), 'C');
    }

    #[test]
    fn test_hex_cell_count() {
        assert_eq!(HexGrid.positions().len(), 91);
    }

    #[test]
    fn test_hex_labels() {
        // File f runs f1..f11 through the centre
        assert_eq!(HexGrid.parse("f1"), Some(Position::new(5, 0)));
        assert_eq!(HexGrid.parse("f6"), Some(Position::new(5, 5)));
        assert_eq!(HexGrid.parse("f11"), Some(Position::new(5, 10)));
        assert_eq!(HexGrid.parse("f12"), None);

        // Edge files have six cells
        assert_eq!(HexGrid.parse("a1"), Some(Position::new(0, 5)));
        assert_eq!(HexGrid.parse("a6"), Some(Position::new(0, 10)));
        assert_eq!(HexGrid.parse("a7"), None);
        assert_eq!(HexGrid.parse("l1"), Some(Position::new(10, 0)));
        assert_eq!(HexGrid.parse("l6"), Some(Position::new(10, 5)));
        assert_eq!(HexGrid.parse("j1"), None);

        for pos in HexGrid.positions() {
            assert_eq!(HexGrid.parse(&HexGrid.label(pos)), Some(pos));
        }
    }

    #[test]
    fn test_hex_label_off_board() {
        let beyond = Position::new(11, 3);
        assert_eq!(HexGrid.label(beyond), beyond.to_string());
        assert_eq!(HexGrid.label(Position::new(-1, 0)), "(-1, 0)");
        assert_eq!(HexGrid.label(Position::new(3, -2)), "(3, -2)");
    }

    #[test]
    fn test_hex_neighbours_of_centre() {
        let centre = HexGrid::cell("f6");
        let mut names: Vec<String> = HexGrid
            .orthogonals()
            .iter()
            .filter_map(|&o| HexGrid.step(centre, o))
            .map(|p| HexGrid.label(p))
            .collect();
        names.sort();
        assert_eq!(names, ["e5", "e6", "f5", "f7", "g5", "g6"]);
    }

    #[test]
    fn test_hex_pawn_starts() {
        let white: Vec<Position> = ["b1", "c2", "d3", "e4", "f5", "g4", "h3", "i2", "k1"]
            .iter()
            .map(|n| HexGrid::cell(n))
            .collect();
        let black: Vec<Position> = ["b7", "c7", "d7", "e7", "f7", "g7", "h7", "i7", "k7"]
            .iter()
            .map(|n| HexGrid::cell(n))
            .collect();

        for pos in HexGrid.positions() {
            assert_eq!(HexGrid.is_pawn_start(pos, Color::White), white.contains(&pos), "{}", HexGrid.label(pos));
            assert_eq!(HexGrid.is_pawn_start(pos, Color::Black), black.contains(&pos), "{}", HexGrid.label(pos));
        }
    }

    #[test]
    fn test_hex_last_rank() {
        assert!(HexGrid.is_last_rank(HexGrid::cell("f11"), Color::White));
        assert!(HexGrid.is_last_rank(HexGrid::cell("a6"), Color::White));
        assert!(!HexGrid.is_last_rank(HexGrid::cell("f10"), Color::White));
        assert!(HexGrid.is_last_rank(HexGrid::cell("l1"), Color::Black));
    }

    #[test]
    fn test_hex_screen_cells_distinct() {
        let (cols, rows) = HexGrid.screen_size();
        let mut seen = std::collections::HashSet::new();
        for pos in HexGrid.positions() {
            let (c, r) = HexGrid.screen_cell(pos);
            assert!(c < cols && r < rows);
            assert!(seen.insert((c, r)));
        }
        // f11 on top, f1 at the bottom
        assert_eq!(HexGrid.screen_cell(HexGrid::cell("f11")), (5, 0));
        assert_eq!(HexGrid.screen_cell(HexGrid::cell("f1")), (5, 20));
    }
}

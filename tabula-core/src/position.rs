//! Board coordinates and direction vectors.
//!
//! A [`Position`] is a pair of small signed integers. Square boards read them
//! as zero-based file and rank; the hexagonal board stores axial coordinates
//! in the same two fields. Whether a position actually exists on a board is a
//! question for the board's [`Topology`](crate::topology::Topology).

use std::fmt;
use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

/// A location on a board. Ordered by file, then rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Position {
        Position { file, rank }
    }

    /// Shift by an offset. Returns `None` only on coordinate overflow.
    #[inline]
    pub fn offset(self, by: Offset) -> Option<Position> {
        Some(Position {
            file: self.file.checked_add(by.df)?,
            rank: self.rank.checked_add(by.dr)?,
        })
    }
}

/// Generic algebraic form (`a1` is file 0, rank 0). Topologies may label
/// their cells differently, see `Topology::label`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..26).contains(&self.file) && self.rank >= 0 {
            write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank as i32 + 1)
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

/// A displacement between two positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Offset {
    pub df: i8,
    pub dr: i8,
}

impl Offset {
    #[inline]
    pub const fn new(df: i8, dr: i8) -> Offset {
        Offset { df, dr }
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.df + rhs.df, self.dr + rhs.dr)
    }
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset::new(-self.df, -self.dr)
    }
}

impl Mul<i8> for Offset {
    type Output = Offset;

    #[inline]
    fn mul(self, rhs: i8) -> Offset {
        Offset::new(self.df * rhs, self.dr * rhs)
    }
}

//! Playable-square numbering over the 8×8 board.
//!
//! Only the 32 dark squares carry a number. Numbers run down the image
//! columns in pairs: column 0 holds squares 1–4 (starting on row 1), column 1
//! holds squares 5–8 (starting on row 0), column 2 holds 9–12, and so on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Squares along one side of the board.
pub const SQUARES_PER_SIDE: i32 = 8;
/// Number of playable (dark) squares.
pub const NUMBER_OF_SQUARES: usize = 32;

/// Numbering errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareError {
    #[error("square number {0} is outside 1..=32")]
    OutOfRange(i64),
    #[error("cell ({col}, {row}) is outside the board")]
    OffBoard { col: i32, row: i32 },
    #[error("cell ({col}, {row}) is a light square")]
    LightSquare { col: i32, row: i32 },
}

/// A playable square, numbered 1..=32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    pub fn new(number: u8) -> Result<Self, SquareError> {
        if (1..=NUMBER_OF_SQUARES as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SquareError::OutOfRange(number as i64))
        }
    }

    /// Square from a 0-based index.
    pub fn from_index(index: usize) -> Result<Self, SquareError> {
        if index < NUMBER_OF_SQUARES {
            Ok(Self(index as u8 + 1))
        } else {
            Err(SquareError::OutOfRange(index as i64 + 1))
        }
    }

    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All 32 squares in numbering order.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=NUMBER_OF_SQUARES as u8).map(Square)
    }

    /// Board cell `(col, row)` of this square.
    pub fn cell(self) -> Cell {
        let k = self.index() as i32;
        let pair = k / 8;
        let within = k % 8;
        let slot = within % 4;
        if within < 4 {
            Cell {
                col: 2 * pair,
                row: 1 + 2 * slot,
            }
        } else {
            Cell {
                col: 2 * pair + 1,
                row: 2 * slot,
            }
        }
    }

    /// Square on the given cell, if the cell is a dark square on the board.
    pub fn from_cell(cell: Cell) -> Result<Self, SquareError> {
        let Cell { col, row } = cell;
        if !(0..SQUARES_PER_SIDE).contains(&col) || !(0..SQUARES_PER_SIDE).contains(&row) {
            return Err(SquareError::OffBoard { col, row });
        }
        if (col + row) % 2 == 0 {
            return Err(SquareError::LightSquare { col, row });
        }
        Ok(Self((4 * col + row / 2 + 1) as u8))
    }

    /// Square `distance` diagonal steps away in `direction`, if on the board.
    pub fn neighbor(self, direction: Diagonal, distance: i32) -> Option<Square> {
        let (dc, dr) = direction.delta();
        let c = self.cell();
        Square::from_cell(Cell {
            col: c.col + dc * distance,
            row: c.row + dr * distance,
        })
        .ok()
    }

    /// Diagonal relation between two squares.
    pub fn diagonal_to(self, other: Square) -> Option<(Diagonal, i32)> {
        let a = self.cell();
        let b = other.cell();
        let dc = b.col - a.col;
        let dr = b.row - a.row;
        if dc == 0 || dc.abs() != dr.abs() {
            return None;
        }
        Some((Diagonal::from_signs(dc.signum(), dr.signum()), dc.abs()))
    }

    /// Square jumped over on a two-step diagonal move.
    pub fn between(self, other: Square) -> Option<Square> {
        match self.diagonal_to(other) {
            Some((dir, 2)) => self.neighbor(dir, 1),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Square::new(value)
    }
}

impl From<Square> for u8 {
    fn from(value: Square) -> Self {
        value.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer cell coordinates; `col` grows along image x, `row` along image y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

/// The four diagonal directions in image orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagonal {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::LeftUp,
        Diagonal::LeftDown,
        Diagonal::RightUp,
        Diagonal::RightDown,
    ];

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Diagonal::LeftUp => (-1, -1),
            Diagonal::LeftDown => (-1, 1),
            Diagonal::RightUp => (1, -1),
            Diagonal::RightDown => (1, 1),
        }
    }

    fn from_signs(dc: i32, dr: i32) -> Self {
        match (dc < 0, dr < 0) {
            (true, true) => Diagonal::LeftUp,
            (true, false) => Diagonal::LeftDown,
            (false, true) => Diagonal::RightUp,
            (false, false) => Diagonal::RightDown,
        }
    }
}

/// Pixel geometry of the canonical (perspective-normalised) board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Side length of one board square in canonical pixels.
    pub square_px: u32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self { square_px: 50 }
    }
}

impl BoardGeometry {
    /// Side length of the canonical board image.
    #[inline]
    pub fn board_px(&self) -> u32 {
        self.square_px.saturating_mul(SQUARES_PER_SIDE as u32)
    }

    /// Pixels covered by one square.
    #[inline]
    pub fn square_area(&self) -> usize {
        let side = self.square_px as usize;
        side.saturating_mul(side)
    }

    /// Top-left pixel `(x, y)` of a square.
    pub fn top_left(&self, square: Square) -> (u32, u32) {
        let c = square.cell();
        (
            (c.col as u32).saturating_mul(self.square_px),
            (c.row as u32).saturating_mul(self.square_px),
        )
    }

    /// Square whose pixel rectangle contains `(x, y)`.
    pub fn square_at(&self, x: u32, y: u32) -> Result<Square, SquareError> {
        let s = self.square_px.max(1);
        Square::from_cell(Cell {
            col: (x / s) as i32,
            row: (y / s) as i32,
        })
    }
}

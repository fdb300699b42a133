//! Square contents and whole-board snapshots.

use crate::square::{Cell, Square, NUMBER_OF_SQUARES, SQUARES_PER_SIDE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

/// Contents of one playable square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    #[default]
    Empty,
    WhiteMan,
    BlackMan,
    WhiteKing,
    BlackKing,
}

impl Occupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Occupancy::Empty
    }

    #[inline]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub fn is_king(self) -> bool {
        matches!(self, Occupancy::WhiteKing | Occupancy::BlackKing)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Occupancy::Empty => None,
            Occupancy::WhiteMan | Occupancy::WhiteKing => Some(Color::White),
            Occupancy::BlackMan | Occupancy::BlackKing => Some(Color::Black),
        }
    }

    pub fn piece(color: Color, king: bool) -> Self {
        match (color, king) {
            (Color::White, false) => Occupancy::WhiteMan,
            (Color::White, true) => Occupancy::WhiteKing,
            (Color::Black, false) => Occupancy::BlackMan,
            (Color::Black, true) => Occupancy::BlackKing,
        }
    }

    /// Same piece with the king marker removed.
    pub fn as_man(self) -> Self {
        match self.color() {
            Some(c) => Occupancy::piece(c, false),
            None => Occupancy::Empty,
        }
    }

    /// True when exactly one side of the pair holds a piece.
    #[inline]
    pub fn polarity_differs(self, other: Occupancy) -> bool {
        self.is_empty() != other.is_empty()
    }

    /// Piece identity check; with `king_aware == false` only colour counts.
    pub fn same_piece(self, other: Occupancy, king_aware: bool) -> bool {
        if king_aware {
            self == other
        } else {
            self.as_man() == other.as_man()
        }
    }

    /// Crown a man that has reached the far rank for its colour.
    pub fn crowned_on(self, square: Square) -> Self {
        let n = square.number();
        match self {
            Occupancy::WhiteMan if n > (NUMBER_OF_SQUARES as u8 - 4) => Occupancy::WhiteKing,
            Occupancy::BlackMan if n <= 4 => Occupancy::BlackKing,
            other => other,
        }
    }

    fn glyph(self) -> char {
        match self {
            Occupancy::Empty => '.',
            Occupancy::WhiteMan => 'w',
            Occupancy::BlackMan => 'b',
            Occupancy::WhiteKing => 'W',
            Occupancy::BlackKing => 'B',
        }
    }
}

/// Contents of all 32 playable squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    squares: [Occupancy; NUMBER_OF_SQUARES],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    pub fn empty() -> Self {
        Self {
            squares: [Occupancy::Empty; NUMBER_OF_SQUARES],
        }
    }

    /// Twelve white men on 1–12, twelve black men on 21–32.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for s in Square::all() {
            let n = s.number();
            if n <= 12 {
                board.set(s, Occupancy::WhiteMan);
            } else if n >= 21 {
                board.set(s, Occupancy::BlackMan);
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Occupancy {
        self.squares[square.index()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, value: Occupancy) {
        self.squares[square.index()] = value;
    }

    /// Iterate `(square, occupancy)` in numbering order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Occupancy)> + '_ {
        Square::all().map(move |s| (s, self.get(s)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|o| o.is_occupied()).count()
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.squares
            .iter()
            .filter(|o| o.color() == Some(color))
            .count()
    }

    /// Squares whose contents differ between `self` and `other`.
    pub fn diff(&self, other: &BoardState) -> Vec<Square> {
        self.iter()
            .filter(|&(s, o)| other.get(s) != o)
            .map(|(s, _)| s)
            .collect()
    }

    /// Piece list for one colour in ground-truth notation, e.g. `"K2,15,19"`.
    pub fn piece_list(&self, color: Color) -> String {
        self.iter()
            .filter(|(_, o)| o.color() == Some(color))
            .map(|(s, o)| {
                if o.is_king() {
                    format!("K{}", s)
                } else {
                    s.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for BoardState {
    /// Text diagram in image orientation; light squares are blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SQUARES_PER_SIDE {
            let mut line = String::with_capacity(16);
            for col in 0..SQUARES_PER_SIDE {
                let cell = Cell { col, row };
                let ch = match Square::from_cell(cell) {
                    Ok(s) => self.get(s).glyph(),
                    Err(_) => ' ',
                };
                line.push(ch);
                if col + 1 < SQUARES_PER_SIDE {
                    line.push(' ');
                }
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// What the vision layer reports for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Classified contents of every square.
    pub board: BoardState,
    /// Foreground pixels in the whole canonical frame.
    pub foreground_pixels: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(n: u8) -> Square {
        Square::new(n).unwrap()
    }

    #[test]
    fn starting_position_layout() {
        let b = BoardState::starting_position();
        assert_eq!(b.piece_count(), 24);
        assert_eq!(b.count_color(Color::White), 12);
        assert_eq!(b.count_color(Color::Black), 12);
        assert_eq!(b.get(sq(12)), Occupancy::WhiteMan);
        assert_eq!(b.get(sq(13)), Occupancy::Empty);
        assert_eq!(b.get(sq(20)), Occupancy::Empty);
        assert_eq!(b.get(sq(21)), Occupancy::BlackMan);
    }

    #[test]
    fn polarity_and_identity() {
        assert!(Occupancy::Empty.polarity_differs(Occupancy::BlackKing));
        assert!(!Occupancy::WhiteMan.polarity_differs(Occupancy::BlackMan));
        assert!(Occupancy::WhiteKing.same_piece(Occupancy::WhiteMan, false));
        assert!(!Occupancy::WhiteKing.same_piece(Occupancy::WhiteMan, true));
        assert!(!Occupancy::WhiteMan.same_piece(Occupancy::BlackMan, false));
    }

    #[test]
    fn crowning_on_far_rank() {
        assert_eq!(Occupancy::WhiteMan.crowned_on(sq(30)), Occupancy::WhiteKing);
        assert_eq!(Occupancy::WhiteMan.crowned_on(sq(28)), Occupancy::WhiteMan);
        assert_eq!(Occupancy::BlackMan.crowned_on(sq(2)), Occupancy::BlackKing);
        assert_eq!(Occupancy::BlackMan.crowned_on(sq(5)), Occupancy::BlackMan);
        assert_eq!(Occupancy::WhiteMan.crowned_on(sq(1)), Occupancy::WhiteMan);
    }

    #[test]
    fn piece_list_notation() {
        let mut b = BoardState::empty();
        b.set(sq(2), Occupancy::BlackKing);
        b.set(sq(15), Occupancy::BlackMan);
        b.set(sq(4), Occupancy::WhiteMan);
        assert_eq!(b.piece_list(Color::Black), "K2,15");
        assert_eq!(b.piece_list(Color::White), "4");
    }

    #[test]
    fn diagram_has_eight_rows() {
        let text = BoardState::starting_position().to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        // row 0 holds squares 5, 13, 21, 29 in columns 1, 3, 5, 7
        assert_eq!(rows[0], "  w   .   b   b");
    }
}

use draughts_core::{Occupancy, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square transition that survived the persistence filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedChange {
    pub square: Square,
    pub frame: u64,
    pub before: Occupancy,
    pub after: Occupancy,
}

impl ConfirmedChange {
    /// A piece left the square.
    #[inline]
    pub fn is_vacate(&self) -> bool {
        self.before.is_occupied() && self.after.is_empty()
    }

    /// A piece arrived on a previously empty square.
    #[inline]
    pub fn is_fill(&self) -> bool {
        self.before.is_empty()
    }
}

impl fmt::Display for ConfirmedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "square {} changed {:?} -> {:?} at frame {}",
            self.square, self.before, self.after, self.frame
        )
    }
}

/// A recorded move. Never mutated once appended to the move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub frame: u64,
    pub from: Square,
    pub to: Square,
    pub piece: Occupancy,
    /// Squares emptied by the move, in jump order. Always empty for temporal moves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captured: Vec<Square>,
}

impl Move {
    /// Same from/to/piece; frame and captures are ignored.
    pub fn same_as(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.piece == other.piece
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_empty() { '-' } else { 'x' };
        write!(
            f,
            "{}{}{} ({:?}) at frame {}",
            self.from, sep, self.to, self.piece, self.frame
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(before: Occupancy, after: Occupancy) -> ConfirmedChange {
        ConfirmedChange {
            square: Square::new(9).unwrap(),
            frame: 4,
            before,
            after,
        }
    }

    #[test]
    fn vacate_and_fill_follow_the_polarity() {
        let left = change(Occupancy::BlackKing, Occupancy::Empty);
        assert!(left.is_vacate() && !left.is_fill());
        let arrived = change(Occupancy::Empty, Occupancy::WhiteMan);
        assert!(arrived.is_fill() && !arrived.is_vacate());
    }

    #[test]
    fn capture_moves_render_with_x() {
        let m = Move {
            frame: 30,
            from: Square::new(9).unwrap(),
            to: Square::new(18).unwrap(),
            piece: Occupancy::WhiteMan,
            captured: vec![Square::new(14).unwrap()],
        };
        assert!(m.to_string().starts_with("9x18"));
    }
}

//! Previous-vs-current board comparison.

use draughts_core::{BoardGeometry, BoardState, FrameObservation, Occupancy, Square};

/// Holds the last confirmed board and flags raw transitions against it.
#[derive(Clone, Debug)]
pub struct BoardStateTracker {
    previous: BoardState,
    piece_count_before: usize,
    square_area: usize,
}

impl BoardStateTracker {
    pub fn new(start: BoardState, geometry: BoardGeometry) -> Self {
        Self {
            piece_count_before: start.piece_count(),
            previous: start,
            square_area: geometry.square_area(),
        }
    }

    #[inline]
    pub fn previous(&self) -> &BoardState {
        &self.previous
    }

    #[inline]
    pub fn piece_count_before(&self) -> usize {
        self.piece_count_before
    }

    /// Foreground budget before a frame counts as "in motion".
    #[inline]
    pub fn motion_limit(&self) -> usize {
        self.piece_count_before.saturating_mul(self.square_area)
    }

    /// Too much of the board differs from the background to trust this frame.
    pub fn in_motion(&self, observation: &FrameObservation) -> bool {
        observation.foreground_pixels > self.motion_limit()
    }

    /// Squares whose occupancy polarity differs from the previous board.
    ///
    /// Colour or king flips on an occupied square are not transitions.
    pub fn raw_transitions(&self, current: &BoardState) -> Vec<Square> {
        Square::all()
            .filter(|&s| self.previous.get(s).polarity_differs(current.get(s)))
            .collect()
    }

    /// Adopt a confirmed square value; returns the value it replaced.
    pub fn accept(&mut self, square: Square, value: Occupancy) -> Occupancy {
        let before = self.previous.get(square);
        self.previous.set(square, value);
        before
    }

    /// Record the detected piece count of a processed frame.
    pub fn note_processed(&mut self, current: &BoardState) {
        self.piece_count_before = current.piece_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(n: u8) -> Square {
        Square::new(n).unwrap()
    }

    #[test]
    fn only_polarity_flips_are_transitions() {
        let tracker = BoardStateTracker::new(BoardState::starting_position(), BoardGeometry::default());
        let mut current = BoardState::starting_position();
        current.set(sq(9), Occupancy::Empty);
        current.set(sq(13), Occupancy::WhiteMan);
        current.set(sq(1), Occupancy::BlackMan); // colour flip only
        current.set(sq(2), Occupancy::WhiteKing); // king flip only
        assert_eq!(tracker.raw_transitions(&current), vec![sq(9), sq(13)]);
    }

    #[test]
    fn motion_limit_follows_processed_piece_count() {
        let mut tracker =
            BoardStateTracker::new(BoardState::starting_position(), BoardGeometry::default());
        assert_eq!(tracker.motion_limit(), 24 * 2500);

        let at_limit = FrameObservation {
            board: BoardState::starting_position(),
            foreground_pixels: 24 * 2500,
        };
        assert!(!tracker.in_motion(&at_limit));
        let over = FrameObservation {
            foreground_pixels: 24 * 2500 + 1,
            ..at_limit
        };
        assert!(tracker.in_motion(&over));

        let mut fewer = BoardState::starting_position();
        fewer.set(sq(1), Occupancy::Empty);
        tracker.note_processed(&fewer);
        assert_eq!(tracker.piece_count_before(), 23);
        assert!(tracker.in_motion(&at_limit));
    }
}

//! Diagonal step / jump legality between two board snapshots.

use draughts_core::{BoardState, Diagonal, Occupancy, Square};
use serde::{Deserialize, Serialize};

/// Shape of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Step,
    /// Squares jumped over, in order.
    Jump { captured: Vec<Square> },
}

impl MoveKind {
    pub fn captured(&self) -> &[Square] {
        match self {
            MoveKind::Step => &[],
            MoveKind::Jump { captured } => captured,
        }
    }
}

/// Why a candidate move was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("source square {0} was empty")]
    SourceEmpty(Square),
    #[error("destination square {0} was already occupied")]
    DestinationOccupied(Square),
    #[error("source square {0} is still occupied")]
    SourceStillOccupied(Square),
    #[error("square {to} does not hold the piece that left {from}")]
    PieceMismatch { from: Square, to: Square },
    #[error("jumped square {0} is still occupied")]
    JumpedOccupied(Square),
    #[error("no diagonal step or jump leads from {from} to {to}")]
    NotDiagonal { from: Square, to: Square },
}

/// A move recovered from two static snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferredMove {
    pub from: Square,
    pub to: Square,
    pub piece: Occupancy,
    pub kind: MoveKind,
}

fn opponent(piece: Occupancy, other: Occupancy) -> bool {
    matches!((piece.color(), other.color()), (Some(a), Some(b)) if a != b)
}

/// Legality checks on the fixed 8×8 diagonal grid.
///
/// Men and kings move the same way here: any of the four diagonals, one step
/// or a jump. Multi-jumps are accepted when every hop lands on an empty
/// square over an opposing piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometricValidator;

impl GeometricValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check `from -> to` against the position before and after the move.
    pub fn validate(
        &self,
        before: &BoardState,
        after: &BoardState,
        from: Square,
        to: Square,
    ) -> Result<MoveKind, MoveRejection> {
        let piece = before.get(from);
        if piece.is_empty() {
            return Err(MoveRejection::SourceEmpty(from));
        }
        if before.get(to).is_occupied() {
            return Err(MoveRejection::DestinationOccupied(to));
        }
        if after.get(from).is_occupied() {
            return Err(MoveRejection::SourceStillOccupied(from));
        }
        if after.get(to).color() != piece.color() {
            return Err(MoveRejection::PieceMismatch { from, to });
        }

        match from.diagonal_to(to) {
            Some((_, 1)) => Ok(MoveKind::Step),
            Some((_, 2)) => match from.between(to) {
                Some(mid) if after.get(mid).is_occupied() => Err(MoveRejection::JumpedOccupied(mid)),
                // only an opposing piece on the previous board counts as taken
                Some(mid) => Ok(MoveKind::Jump {
                    captured: if opponent(piece, before.get(mid)) {
                        vec![mid]
                    } else {
                        Vec::new()
                    },
                }),
                None => Err(MoveRejection::NotDiagonal { from, to }),
            },
            _ => self
                .jump_paths(before, Some(after), from, to)
                .into_iter()
                .next()
                .map(|captured| MoveKind::Jump { captured })
                .ok_or(MoveRejection::NotDiagonal { from, to }),
        }
    }

    /// All capture sequences of at least two hops from `from` ending on `to`.
    ///
    /// Each hop jumps an opposing piece of `before` onto a square that is empty
    /// once `from` has been vacated. With `after`, jumped squares must also be
    /// empty there.
    pub fn jump_paths(
        &self,
        before: &BoardState,
        after: Option<&BoardState>,
        from: Square,
        to: Square,
    ) -> Vec<Vec<Square>> {
        let piece = before.get(from);
        if piece.is_empty() {
            return Vec::new();
        }
        let mut board = *before;
        board.set(from, Occupancy::Empty);

        let mut found = Vec::new();
        let mut captured = Vec::new();
        Self::search(&board, after, piece, from, to, &mut captured, &mut found);
        found.retain(|path| path.len() >= 2);
        found
    }

    fn search(
        board: &BoardState,
        after: Option<&BoardState>,
        piece: Occupancy,
        cur: Square,
        to: Square,
        captured: &mut Vec<Square>,
        found: &mut Vec<Vec<Square>>,
    ) {
        for dir in Diagonal::ALL {
            let (Some(mid), Some(land)) = (cur.neighbor(dir, 1), cur.neighbor(dir, 2)) else {
                continue;
            };
            if !opponent(piece, board.get(mid))
                || captured.contains(&mid)
                || board.get(land).is_occupied()
                || after.is_some_and(|a| a.get(mid).is_occupied())
            {
                continue;
            }
            captured.push(mid);
            if land == to {
                found.push(captured.clone());
            }
            Self::search(board, after, piece, land, to, captured, found);
            captured.pop();
        }
    }

    /// Apply an accepted move: relocate the piece, clear jumped squares, crown.
    ///
    /// Returns the piece now standing on `to`.
    pub fn execute(&self, board: &mut BoardState, from: Square, to: Square, kind: &MoveKind) -> Occupancy {
        let piece = board.get(from).crowned_on(to);
        board.set(from, Occupancy::Empty);
        board.set(to, piece);
        for &taken in kind.captured() {
            if board.get(taken).is_occupied() {
                log::info!("piece taken at {}", taken);
            }
            board.set(taken, Occupancy::Empty);
        }
        piece
    }

    /// The single legal move turning `before` into `after`, if there is one.
    ///
    /// Colour flips and crowning on occupied squares are ignored; only the
    /// squares that were vacated and filled are considered.
    pub fn infer_move(&self, before: &BoardState, after: &BoardState) -> Option<InferredMove> {
        let vacated: Vec<Square> = Square::all()
            .filter(|&s| before.get(s).is_occupied() && after.get(s).is_empty())
            .collect();
        let filled: Vec<Square> = Square::all()
            .filter(|&s| before.get(s).is_empty() && after.get(s).is_occupied())
            .collect();
        let [to] = filled.as_slice() else {
            return None;
        };
        let to = *to;

        let mut matches = vacated.iter().filter_map(|&from| {
            let kind = self.validate(before, after, from, to).ok()?;
            let mut expected: Vec<Square> = kind.captured().to_vec();
            expected.push(from);
            expected.sort();
            (expected == vacated).then(|| InferredMove {
                from,
                to,
                piece: before.get(from),
                kind,
            })
        });
        let first = matches.next()?;
        // ambiguous snapshots are not explained
        matches.next().is_none().then_some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(n: u8) -> Square {
        Square::new(n).unwrap()
    }

    fn board(pieces: &[(u8, Occupancy)]) -> BoardState {
        let mut b = BoardState::empty();
        for &(n, p) in pieces {
            b.set(sq(n), p);
        }
        b
    }

    use Occupancy::{BlackMan, WhiteMan};

    #[test]
    fn single_step_is_valid() {
        let before = board(&[(9, WhiteMan)]);
        let after = board(&[(13, WhiteMan)]);
        let v = GeometricValidator::new();
        assert_eq!(v.validate(&before, &after, sq(9), sq(13)), Ok(MoveKind::Step));
    }

    #[test]
    fn jump_clears_intervening_square() {
        // 9 -> 18 jumps over 14 in this numbering
        assert_eq!(sq(9).between(sq(18)), Some(sq(14)));
        let before = board(&[(9, WhiteMan), (14, BlackMan)]);
        let after = board(&[(18, WhiteMan)]);
        let v = GeometricValidator::new();
        let kind = v.validate(&before, &after, sq(9), sq(18)).unwrap();
        assert_eq!(kind, MoveKind::Jump { captured: vec![sq(14)] });

        let mut settled = before;
        let placed = v.execute(&mut settled, sq(9), sq(18), &kind);
        assert_eq!(placed, WhiteMan);
        assert_eq!(settled, after);
    }

    #[test]
    fn jump_over_empty_square_takes_nothing() {
        let before = board(&[(9, WhiteMan), (15, BlackMan)]);
        let after = board(&[(15, BlackMan), (18, WhiteMan)]);
        let v = GeometricValidator::new();
        let kind = v.validate(&before, &after, sq(9), sq(18)).unwrap();
        assert_eq!(kind, MoveKind::Jump { captured: Vec::new() });

        // a piece of the mover's own colour is not taken either
        let before = board(&[(9, WhiteMan), (14, WhiteMan)]);
        let after = board(&[(18, WhiteMan)]);
        let kind = v.validate(&before, &after, sq(9), sq(18)).unwrap();
        assert!(kind.captured().is_empty());
    }

    #[test]
    fn jump_over_occupied_square_is_rejected() {
        let before = board(&[(9, WhiteMan), (14, BlackMan)]);
        let after = board(&[(14, BlackMan), (18, WhiteMan)]);
        let v = GeometricValidator::new();
        assert_eq!(
            v.validate(&before, &after, sq(9), sq(18)),
            Err(MoveRejection::JumpedOccupied(sq(14)))
        );
    }

    #[test]
    fn non_diagonal_and_mismatched_moves_are_rejected() {
        let v = GeometricValidator::new();
        let before = board(&[(9, WhiteMan)]);
        let after = board(&[(10, WhiteMan)]);
        assert_eq!(
            v.validate(&before, &after, sq(9), sq(10)),
            Err(MoveRejection::NotDiagonal { from: sq(9), to: sq(10) })
        );
        let after = board(&[(13, BlackMan)]);
        assert_eq!(
            v.validate(&before, &after, sq(9), sq(13)),
            Err(MoveRejection::PieceMismatch { from: sq(9), to: sq(13) })
        );
        let after = board(&[(9, WhiteMan), (13, WhiteMan)]);
        assert_eq!(
            v.validate(&before, &after, sq(9), sq(13)),
            Err(MoveRejection::SourceStillOccupied(sq(9)))
        );
    }

    #[test]
    fn double_jump_path_is_found() {
        // 18 -> 2 over 15 and 7
        let before = board(&[(18, BlackMan), (15, WhiteMan), (7, WhiteMan)]);
        let after = board(&[(2, Occupancy::BlackKing)]);
        let v = GeometricValidator::new();
        let kind = v.validate(&before, &after, sq(18), sq(2)).unwrap();
        assert_eq!(kind.captured(), &[sq(15), sq(7)]);

        let mut settled = before;
        assert_eq!(v.execute(&mut settled, sq(18), sq(2), &kind), Occupancy::BlackKing);
        assert_eq!(settled, after);
    }

    #[test]
    fn infers_move_between_snapshots() {
        let v = GeometricValidator::new();
        let before = BoardState::starting_position();
        let mut after = before;
        after.set(sq(12), Occupancy::Empty);
        after.set(sq(16), WhiteMan);
        let m = v.infer_move(&before, &after).unwrap();
        assert_eq!((m.from, m.to, m.kind), (sq(12), sq(16), MoveKind::Step));
        assert_eq!(m.piece, WhiteMan);

        assert!(v.infer_move(&before, &before).is_none());
    }
}

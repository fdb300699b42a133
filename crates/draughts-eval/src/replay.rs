//! Rule-aware replay of a move list.

use crate::{MoveTruth, ReplayError};
use draughts_core::{BoardState, Square};
use draughts_tracker::{GeometricValidator, MoveKind};

/// Apply `from -> to` to `board` under draughts rules.
///
/// Single steps go in any diagonal direction. Jumps must pass over an
/// opposing piece; longer moves are resolved as a capture sequence. Captured
/// pieces are removed and men reaching the far rank are crowned.
pub fn apply_move(board: &mut BoardState, from: Square, to: Square) -> Result<MoveKind, ReplayError> {
    let piece = board.get(from);
    if piece.is_empty() {
        return Err(ReplayError::EmptySource { from, to });
    }
    if board.get(to).is_occupied() {
        return Err(ReplayError::DestinationOccupied { from, to });
    }

    let validator = GeometricValidator::new();
    let kind = match from.diagonal_to(to) {
        Some((_, 1)) => MoveKind::Step,
        Some((_, 2)) => {
            let mid = from
                .between(to)
                .filter(|&m| {
                    let jumped = board.get(m);
                    jumped.is_occupied() && jumped.color() != piece.color()
                })
                .ok_or(ReplayError::NoPath { from, to })?;
            MoveKind::Jump {
                captured: vec![mid],
            }
        }
        _ => validator
            .jump_paths(board, None, from, to)
            .into_iter()
            .next()
            .map(|captured| MoveKind::Jump { captured })
            .ok_or(ReplayError::NoPath { from, to })?,
    };

    validator.execute(board, from, to, &kind);
    Ok(kind)
}

/// Replay `moves` from `start`; returns the position after each move.
pub fn replay(start: BoardState, moves: &[MoveTruth]) -> Result<Vec<BoardState>, ReplayError> {
    let mut board = start;
    let mut positions = Vec::with_capacity(moves.len());
    for m in moves {
        apply_move(&mut board, m.from, m.to)?;
        positions.push(board);
    }
    Ok(positions)
}

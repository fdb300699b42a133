//! Matching recorded moves against the ground-truth move list.

use crate::MoveTruth;
use draughts_tracker::Move;
use serde::{Deserialize, Serialize};

/// A ground-truth move together with the frame it was detected at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedMove {
    pub expected: MoveTruth,
    pub detected_frame: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvaluation {
    pub recorded: usize,
    pub detected: Vec<MatchedMove>,
    pub missed: Vec<MoveTruth>,
}

impl MoveEvaluation {
    pub fn missed_count(&self) -> usize {
        self.missed.len()
    }
}

/// A ground-truth move is detected when some recorded move has the same
/// from/to squares within `window` frames. Piece type is not compared.
pub fn evaluate_moves(truth: &[MoveTruth], recorded: &[Move], window: u64) -> MoveEvaluation {
    let mut eval = MoveEvaluation {
        recorded: recorded.len(),
        ..MoveEvaluation::default()
    };
    for expected in truth {
        let hit = recorded.iter().find(|m| {
            m.frame.abs_diff(expected.frame) <= window
                && m.from == expected.from
                && m.to == expected.to
        });
        match hit {
            Some(m) => {
                log::info!(
                    "move detected - frame {} from {} to {}",
                    m.frame,
                    m.from,
                    m.to
                );
                eval.detected.push(MatchedMove {
                    expected: *expected,
                    detected_frame: m.frame,
                });
            }
            None => {
                log::info!(
                    "move missed - frame {} from {} to {}",
                    expected.frame,
                    expected.from,
                    expected.to
                );
                eval.missed.push(*expected);
            }
        }
    }
    log::info!("missed {} moves", eval.missed_count());
    eval
}

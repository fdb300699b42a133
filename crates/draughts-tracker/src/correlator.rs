//! Pairing of confirmed changes into moves.

use crate::{ConfirmedChange, Move};

#[inline]
fn within(a: u64, b: u64, window: u64) -> bool {
    a.abs_diff(b) <= window
}

/// Vacate/fill pairs among changes near `frame`, newest first.
///
/// Both scans stop at the first change older than the window.
pub(crate) fn candidate_pairs(
    frame: u64,
    changes: &[ConfirmedChange],
    window: u64,
) -> Vec<(ConfirmedChange, ConfirmedChange)> {
    let mut pairs = Vec::new();
    for a in changes.iter().rev() {
        if !within(frame, a.frame, window) {
            break;
        }
        for b in changes.iter().rev() {
            if !within(frame, b.frame, window) {
                break;
            }
            if within(a.frame, b.frame, window)
                && a.is_vacate()
                && b.is_fill()
                && a.square != b.square
            {
                pairs.push((*a, *b));
            }
        }
    }
    pairs
}

/// True if `log` already holds the same from/to/piece within `window` of `frame`.
pub(crate) fn is_duplicate(log: &[Move], candidate: &Move, frame: u64, window: u64) -> bool {
    log.iter()
        .any(|m| within(frame, m.frame, window) && m.same_as(candidate))
}

/// Time-only correlation: any vacated square paired with any filled square.
#[derive(Clone, Copy, Debug)]
pub struct TemporalCorrelator {
    window: u64,
}

impl TemporalCorrelator {
    pub fn new(window: u64) -> Self {
        Self { window }
    }

    /// Appends new moves for `frame` to `log` and returns how many were added.
    pub fn correlate(&self, frame: u64, changes: &[ConfirmedChange], log: &mut Vec<Move>) -> usize {
        let mut added = 0;
        for (a, b) in candidate_pairs(frame, changes, self.window) {
            let candidate = Move {
                frame,
                from: a.square,
                to: b.square,
                piece: a.before,
                captured: Vec::new(),
            };
            if is_duplicate(log, &candidate, frame, self.window) {
                continue;
            }
            log::info!("move {}", candidate);
            log.push(candidate);
            added += 1;
        }
        added
    }
}

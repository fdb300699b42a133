//! Multi-frame voting on raw transitions.

use draughts_core::Square;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An unconfirmed transition on one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    pub square: Square,
    pub first_frame: u64,
    pub frequency: u32,
}

/// Confirms a square transition once it has been seen `threshold` times
/// within `window` frames of its first sighting.
///
/// A pending entry is live for frames `first_frame .. first_frame + window`.
#[derive(Clone, Debug)]
pub struct PersistenceFilter {
    window: u64,
    threshold: u32,
    pending: BTreeMap<Square, PendingChange>,
}

impl PersistenceFilter {
    pub fn new(window: u64, threshold: u32) -> Self {
        Self {
            window,
            threshold: threshold.max(1),
            pending: BTreeMap::new(),
        }
    }

    #[inline]
    fn live(&self, entry: &PendingChange, frame: u64) -> bool {
        frame.saturating_sub(entry.first_frame) < self.window
    }

    /// Drop entries whose window has elapsed at `frame`; returns how many.
    pub fn purge(&mut self, frame: u64) -> usize {
        let before = self.pending.len();
        let (window, threshold) = (self.window, self.threshold);
        self.pending.retain(|square, entry| {
            let keep = frame.saturating_sub(entry.first_frame) < window;
            if !keep {
                log::debug!(
                    "discarding stale change on square {} ({} of {} sightings)",
                    square,
                    entry.frequency,
                    threshold
                );
            }
            keep
        });
        before - self.pending.len()
    }

    /// Record a raw transition on `square`; returns `true` when it is confirmed.
    ///
    /// A confirmed entry is removed. A stale entry restarts at `frame`.
    pub fn observe(&mut self, square: Square, frame: u64) -> bool {
        let live = self
            .pending
            .get(&square)
            .is_some_and(|e| self.live(e, frame));

        if live {
            if let Some(entry) = self.pending.get_mut(&square) {
                entry.frequency += 1;
                if entry.frequency >= self.threshold {
                    self.pending.remove(&square);
                    return true;
                }
            }
            return false;
        }

        if self.threshold <= 1 {
            self.pending.remove(&square);
            return true;
        }
        self.pending.insert(
            square,
            PendingChange {
                square,
                first_frame: frame,
                frequency: 1,
            },
        );
        false
    }

    pub fn pending(&self, square: Square) -> Option<&PendingChange> {
        self.pending.get(&square)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

//! One analysis run over a frame stream.

use crate::correlator::{candidate_pairs, is_duplicate};
use crate::{
    BoardStateTracker, ConfirmedChange, GeometricValidator, Move, MoveStrategy, PersistenceFilter,
    TemporalCorrelator, TrackerParams,
};
use draughts_core::{BoardGeometry, BoardState, FrameObservation};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// What happened to one frame handed to the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Too much foreground; the frame was skipped.
    Deferred {
        foreground_pixels: usize,
        limit: usize,
    },
    Processed {
        confirmed: Vec<ConfirmedChange>,
        moves: Vec<Move>,
    },
}

/// Owns all mutable state of an analysis run: tracker, pending changes,
/// confirmed-change log, move log and the settled game position.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    params: TrackerParams,
    tracker: BoardStateTracker,
    filter: PersistenceFilter,
    validator: GeometricValidator,
    changes: Vec<ConfirmedChange>,
    moves: Vec<Move>,
    settled: BoardState,
    start_pieces: usize,
    frames_seen: u64,
    frames_deferred: u64,
}

impl AnalysisSession {
    /// Session starting from the standard opening position.
    pub fn new(params: TrackerParams, geometry: BoardGeometry) -> Self {
        Self::with_start(params, geometry, BoardState::starting_position())
    }

    pub fn with_start(params: TrackerParams, geometry: BoardGeometry, start: BoardState) -> Self {
        Self {
            tracker: BoardStateTracker::new(start, geometry),
            filter: PersistenceFilter::new(params.window, params.confirm_threshold),
            validator: GeometricValidator::new(),
            changes: Vec::new(),
            moves: Vec::new(),
            settled: start,
            start_pieces: start.piece_count(),
            frames_seen: 0,
            frames_deferred: 0,
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    /// Last confirmed board.
    #[inline]
    pub fn previous(&self) -> &BoardState {
        self.tracker.previous()
    }

    /// Game position after the moves accepted so far (geometric strategy).
    #[inline]
    pub fn settled(&self) -> &BoardState {
        &self.settled
    }

    #[inline]
    pub fn changes(&self) -> &[ConfirmedChange] {
        &self.changes
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn filter(&self) -> &PersistenceFilter {
        &self.filter
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    pub fn frames_deferred(&self) -> u64 {
        self.frames_deferred
    }

    /// Feed the observation of frame `frame`. Frames must arrive in order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(frame = frame))
    )]
    pub fn process_frame(&mut self, frame: u64, observation: &FrameObservation) -> FrameOutcome {
        self.frames_seen += 1;
        self.filter.purge(frame);

        if self.tracker.in_motion(observation) {
            self.frames_deferred += 1;
            log::debug!(
                "frame {}: {} foreground px over limit {}, deferring",
                frame,
                observation.foreground_pixels,
                self.tracker.motion_limit()
            );
            return FrameOutcome::Deferred {
                foreground_pixels: observation.foreground_pixels,
                limit: self.tracker.motion_limit(),
            };
        }

        let current = &observation.board;
        let mut confirmed = Vec::new();
        for square in self.tracker.raw_transitions(current) {
            if !self.filter.observe(square, frame) {
                continue;
            }
            let after = current.get(square);
            let before = self.tracker.accept(square, after);
            let change = ConfirmedChange {
                square,
                frame,
                before,
                after,
            };
            log::info!("{}", change);
            self.changes.push(change);
            confirmed.push(change);
        }
        self.tracker.note_processed(current);

        let confirmed_pieces = self.tracker.previous().piece_count();
        if confirmed_pieces > self.start_pieces {
            log::warn!(
                "frame {}: confirmed board holds {} pieces, more than the {} at start",
                frame,
                confirmed_pieces,
                self.start_pieces
            );
        }

        let first_new = self.moves.len();
        match self.params.strategy {
            MoveStrategy::Temporal => {
                TemporalCorrelator::new(self.params.correlation_window).correlate(
                    frame,
                    &self.changes,
                    &mut self.moves,
                );
            }
            MoveStrategy::Geometric => self.correlate_geometric(frame),
        }

        FrameOutcome::Processed {
            confirmed,
            moves: self.moves[first_new..].to_vec(),
        }
    }

    fn correlate_geometric(&mut self, frame: u64) {
        let window = self.params.correlation_window;
        for (a, b) in candidate_pairs(frame, &self.changes, window) {
            let kind = match self
                .validator
                .validate(&self.settled, self.tracker.previous(), a.square, b.square)
            {
                Ok(kind) => kind,
                Err(reason) => {
                    log::trace!("frame {}: {} -> {} rejected: {}", frame, a.square, b.square, reason);
                    continue;
                }
            };
            let candidate = Move {
                frame,
                from: a.square,
                to: b.square,
                piece: self.settled.get(a.square),
                captured: kind.captured().to_vec(),
            };
            if is_duplicate(&self.moves, &candidate, frame, window) {
                continue;
            }
            self.validator
                .execute(&mut self.settled, a.square, b.square, &kind);
            log::info!("move {}", candidate);
            self.moves.push(candidate);
        }
    }
}

//! Board-state tracking and move inference over a classified frame stream.
//!
//! Per frame, an [`AnalysisSession`]:
//! 1. purges pending changes whose window has elapsed,
//! 2. defers the frame if too much of the board is in motion,
//! 3. flags occupancy-polarity flips against the last confirmed board,
//! 4. confirms flips seen often enough by the [`PersistenceFilter`],
//! 5. pairs confirmed vacate/fill changes into [`Move`]s, either with the
//!    [`GeometricValidator`] (default) or the [`TemporalCorrelator`].

mod change;
mod correlator;
mod geometric;
mod params;
mod persistence;
mod session;
mod tracker;

pub use change::{ConfirmedChange, Move};
pub use correlator::TemporalCorrelator;
pub use geometric::{GeometricValidator, InferredMove, MoveKind, MoveRejection};
pub use params::{MoveStrategy, TrackerParams};
pub use persistence::{PendingChange, PersistenceFilter};
pub use session::{AnalysisSession, FrameOutcome};
pub use tracker::BoardStateTracker;

//! Evaluation against hand-authored ground truth.
//!
//! Holds the DraughtsGame1 tables (69 photographed positions and 68 video
//! moves), confusion matrices for static classification, move matching for
//! video runs and a rule-aware replay used to cross-check the tables.

mod confusion;
mod error;
mod moves;
mod replay;
mod truth;

pub use confusion::{ConfusionMatrix, ConfusionSummary, KingConfusion, ManConfusion};
pub use error::{GroundTruthError, ReplayError};
pub use moves::{evaluate_moves, MatchedMove, MoveEvaluation};
pub use replay::{apply_move, replay};
pub use truth::{parse_piece_list, BoardTruth, GroundTruth, MoveTruth, DRAUGHTS_GAME1_JSON};

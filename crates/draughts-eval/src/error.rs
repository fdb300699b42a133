use draughts_core::{Square, SquareError};

/// Errors raised while loading ground-truth tables.
#[derive(thiserror::Error, Debug)]
pub enum GroundTruthError {
    #[error("malformed piece token {token:?}")]
    MalformedToken { token: String },
    #[error(transparent)]
    Square(#[from] SquareError),
    #[error("square {0} listed twice")]
    DuplicateSquare(Square),
    #[error("failed to decode ground-truth table: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while replaying a move list.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("move {from}-{to}: no piece on the source square")]
    EmptySource { from: Square, to: Square },
    #[error("move {from}-{to}: destination is occupied")]
    DestinationOccupied { from: Square, to: Square },
    #[error("move {from}-{to}: no legal step or capture sequence")]
    NoPath { from: Square, to: Square },
}

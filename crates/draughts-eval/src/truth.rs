//! Ground-truth tables: static board positions and the move list of a game.

use crate::GroundTruthError;
use draughts_core::{BoardState, Color, Occupancy, Square};
use serde::{Deserialize, Serialize};

/// Ground truth of the recorded game, embedded at build time.
pub const DRAUGHTS_GAME1_JSON: &str = include_str!("../data/draughts_game1.json");

/// Parse a piece list such as `"K2,15,19"` onto `board`.
///
/// Empty lists are allowed. A `K` prefix marks a king.
pub fn parse_piece_list(
    list: &str,
    color: Color,
    board: &mut BoardState,
) -> Result<(), GroundTruthError> {
    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (king, digits) = match token.strip_prefix('K') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let number: u8 = digits
            .parse()
            .map_err(|_| GroundTruthError::MalformedToken {
                token: token.to_string(),
            })?;
        let square = Square::new(number)?;
        if board.get(square).is_occupied() {
            return Err(GroundTruthError::DuplicateSquare(square));
        }
        board.set(square, Occupancy::piece(color, king));
    }
    Ok(())
}

/// One photographed position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTruth {
    pub file: String,
    pub white: String,
    pub black: String,
}

impl BoardTruth {
    pub fn board(&self) -> Result<BoardState, GroundTruthError> {
        let mut board = BoardState::empty();
        parse_piece_list(&self.white, Color::White, &mut board)?;
        parse_piece_list(&self.black, Color::Black, &mut board)?;
        Ok(board)
    }

    /// Expected contents of one square; kings fold into men unless `king_aware`.
    pub fn square(&self, square: Square, king_aware: bool) -> Result<Occupancy, GroundTruthError> {
        let value = self.board()?.get(square);
        Ok(if king_aware { value } else { value.as_man() })
    }
}

/// One move of the recorded video, at its approximate frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTruth {
    pub frame: u64,
    pub from: Square,
    pub to: Square,
    pub piece: Occupancy,
}

/// Static positions and video moves of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub game: String,
    #[serde(default)]
    pub video: Option<String>,
    pub boards: Vec<BoardTruth>,
    pub moves: Vec<MoveTruth>,
}

impl GroundTruth {
    pub fn from_json(raw: &str) -> Result<Self, GroundTruthError> {
        let truth: Self = serde_json::from_str(raw)?;
        // surface malformed piece lists at load time
        for b in &truth.boards {
            b.board()?;
        }
        Ok(truth)
    }

    /// The embedded DraughtsGame1 tables (69 positions, 68 moves).
    pub fn draughts_game1() -> Result<Self, GroundTruthError> {
        Self::from_json(DRAUGHTS_GAME1_JSON)
    }

    /// Parsed positions in table order.
    pub fn positions(&self) -> Result<Vec<BoardState>, GroundTruthError> {
        self.boards.iter().map(BoardTruth::board).collect()
    }
}

//! JSON configuration and report helpers.

use crate::core::{BoardCorners, BoardGeometry, Color, Occupancy, Square};
use crate::eval::{ConfusionSummary, GroundTruth, MoveEvaluation};
use crate::tracker::{AnalysisSession, ConfirmedChange, InferredMove, Move, MoveStrategy, TrackerParams};
use crate::vision::{ClassifierParams, SegmentParams};
use crate::AnalysisError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn default_corners() -> Option<BoardCorners> {
    Some(BoardCorners::default())
}

fn default_match_window() -> u64 {
    10
}

/// Configuration of one analysis run.
///
/// Paths are relative to the working directory. `corners: null` means the
/// media is already in the canonical board frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Photograph of the empty board, used as the static background.
    #[serde(default)]
    pub background_path: Option<String>,
    /// Directory of video frames as still images.
    #[serde(default)]
    pub frames_dir: Option<String>,
    /// Directory holding the photographed positions named in the ground truth.
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Ground-truth JSON; the embedded DraughtsGame1 tables when unset.
    #[serde(default)]
    pub ground_truth_path: Option<String>,
    #[serde(default = "default_corners")]
    pub corners: Option<BoardCorners>,
    #[serde(default)]
    pub geometry: BoardGeometry,
    #[serde(default)]
    pub segment: SegmentParams,
    #[serde(default)]
    pub classifier: ClassifierParams,
    #[serde(default)]
    pub tracker: TrackerParams,
    /// Throttle the video loop to this rate; unthrottled when unset.
    #[serde(default)]
    pub playback_fps: Option<f64>,
    /// Frame tolerance when matching recorded moves against ground truth.
    #[serde(default = "default_match_window")]
    pub match_window: u64,
    #[serde(default)]
    pub video_report_path: Option<String>,
    #[serde(default)]
    pub static_report_path: Option<String>,
    /// Write rectified boards and foreground masks of static images here.
    #[serde(default)]
    pub dump_dir: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            background_path: None,
            frames_dir: None,
            static_dir: None,
            ground_truth_path: None,
            corners: default_corners(),
            geometry: BoardGeometry::default(),
            segment: SegmentParams::default(),
            classifier: ClassifierParams::default(),
            tracker: TrackerParams::default(),
            playback_fps: None,
            match_window: default_match_window(),
            video_report_path: None,
            static_report_path: None,
            dump_dir: None,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Switch classifier and segmenter to the king-aware presets.
    pub fn king_aware(mut self) -> Self {
        self.classifier = ClassifierParams::king_aware();
        self.segment = SegmentParams::king_aware();
        self
    }

    /// Resolve the video report path.
    pub fn video_report_path(&self) -> PathBuf {
        self.video_report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("video_report.json"))
    }

    /// Resolve the static report path.
    pub fn static_report_path(&self) -> PathBuf {
        self.static_report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static_report.json"))
    }

    /// Load the configured ground truth, or the embedded tables.
    pub fn ground_truth(&self) -> Result<GroundTruth, AnalysisError> {
        match &self.ground_truth_path {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                Ok(GroundTruth::from_json(&raw)?)
            }
            None => Ok(GroundTruth::draughts_game1()?),
        }
    }
}

/// Outcome of a video run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReport {
    #[serde(default)]
    pub frames_dir: Option<String>,
    pub strategy: MoveStrategy,
    pub frames: u64,
    pub frames_deferred: u64,
    pub changes: Vec<ConfirmedChange>,
    pub moves: Vec<Move>,
    /// Piece lists of the last confirmed board, in ground-truth notation.
    pub final_white: String,
    pub final_black: String,
    #[serde(default)]
    pub evaluation: Option<MoveEvaluation>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VideoReport {
    /// Build a report from the state of a finished session.
    pub fn from_session(cfg: &AnalysisConfig, session: &AnalysisSession) -> Self {
        let board = session.previous();
        Self {
            frames_dir: cfg.frames_dir.clone(),
            strategy: session.params().strategy,
            frames: session.frames_seen(),
            frames_deferred: session.frames_deferred(),
            changes: session.changes().to_vec(),
            moves: session.moves().to_vec(),
            final_white: board.piece_list(Color::White),
            final_black: board.piece_list(Color::Black),
            evaluation: None,
            error: None,
        }
    }

    /// Record an error that cut the run short.
    pub fn set_error(&mut self, err: &AnalysisError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// A move explained between two consecutive photographs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredMoveReport {
    pub from: Square,
    pub to: Square,
    pub piece: Occupancy,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captured: Vec<Square>,
}

impl From<InferredMove> for InferredMoveReport {
    fn from(m: InferredMove) -> Self {
        Self {
            from: m.from,
            to: m.to,
            piece: m.piece,
            captured: m.kind.captured().to_vec(),
        }
    }
}

/// Classification of one photographed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticImageResult {
    pub file: String,
    pub detected_white: String,
    pub detected_black: String,
    /// Squares whose detected contents disagree with the ground truth.
    pub errors: usize,
    /// Move explaining the change from the previous image, if one fits.
    #[serde(default)]
    pub inferred_move: Option<InferredMoveReport>,
}

/// Outcome of a static-image run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticReport {
    #[serde(default)]
    pub static_dir: Option<String>,
    pub king_aware: bool,
    pub images: Vec<StaticImageResult>,
    /// Ground-truth images that could not be read.
    pub missing: Vec<String>,
    pub confusion: ConfusionSummary,
    #[serde(default)]
    pub error: Option<String>,
}

impl StaticReport {
    pub fn set_error(&mut self, err: &AnalysisError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

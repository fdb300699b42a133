//! High-level facade crate for the `draughts-*` workspace.
//!
//! This crate provides:
//! - re-exports of the underlying crates under short names
//! - JSON configuration and report types ([`AnalysisConfig`], [`VideoReport`],
//!   [`StaticReport`])
//! - perspective normalisation from configured board corners
//! - frame sources and decoder-independent analysis drivers
//! - (feature-gated) `image`-crate decoding and end-to-end runs over media
//!   on disk, plus the `draughts-analysis` CLI
//!
//! ## Quickstart
//!
//! ```no_run
//! use draughts_analysis::{run_video, AnalysisConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cfg = AnalysisConfig::default();
//! cfg.background_path = Some("Media/DraughtsGame1EmptyBoard.JPG".into());
//! cfg.frames_dir = Some("Media/DraughtsGame1".into());
//! let report = run_video(&cfg)?;
//! println!("{} moves", report.moves.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `draughts_analysis::core`: squares, boards, image buffers, homography.
//! - `draughts_analysis::vision`: segmentation and per-square classification.
//! - `draughts_analysis::tracker`: debounced tracking and move inference.
//! - `draughts_analysis::eval`: ground truth, confusion matrices, replay.

pub use draughts_core as core;
pub use draughts_eval as eval;
pub use draughts_tracker as tracker;
pub use draughts_vision as vision;

mod error;
mod io;
mod pipeline;
mod rectify;
mod source;

#[cfg(feature = "image")]
mod media;
#[cfg(feature = "image")]
mod run;

pub use error::AnalysisError;
pub use io::{
    AnalysisConfig, InferredMoveReport, StaticImageResult, StaticReport, VideoReport,
};
pub use pipeline::{analyze_video, track_frames, StaticConfusion, StaticEvaluator};
pub use rectify::{canonical_frame, BoardRectifier};
pub use source::{FramePacer, FrameSource, MemorySource};

#[cfg(feature = "image")]
pub use media::{from_image, load_rgb, rgb_view, save_gray, save_rgb, ImageSequence};
#[cfg(feature = "image")]
pub use run::{build_observer, run_static, run_video};

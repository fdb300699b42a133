//! Vision stages of the draughts analysis pipeline.
//!
//! - [`ForegroundSegmenter`]: background subtraction, threshold and morphology.
//! - [`SquareClassifier`]: occupancy, hue-based colour and contour-based king
//!   detection for each of the 32 playable squares.
//! - [`FrameObserver`]: runs both over a canonical frame and reports a
//!   [`draughts_core::FrameObservation`].
//!
//! All inputs are expected in the canonical (perspective-normalised) board
//! frame; see `draughts_core::BoardGeometry`.

mod classify;
mod contour;
mod error;
mod gray;
mod hue;
mod morphology;
mod observer;
mod params;
mod segment;

pub use classify::SquareClassifier;
pub use contour::{find_contours, largest_contour, Contour};
pub use error::VisionError;
pub use gray::{luma, threshold_binary, to_gray};
pub use hue::{hue_8bit, HueHistogram, HUE_RANGE};
pub use morphology::{close, dilate, erode, open};
pub use observer::{FrameObserver, ObservationDetail};
pub use params::{ClassifierParams, SegmentParams};
pub use segment::{mask_frame, ForegroundSegmenter};

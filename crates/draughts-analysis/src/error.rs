use crate::{core, eval, vision};
use std::path::PathBuf;

/// Errors produced by the high-level analysis helpers.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error("cannot open image file {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("no {what} configured")]
    MissingInput { what: &'static str },

    #[error("no frames found in {0}")]
    NoFrames(PathBuf),

    #[error("board corners do not define a perspective mapping")]
    DegenerateCorners,

    #[error(transparent)]
    Buffer(#[from] core::ImageBufferError),

    #[error(transparent)]
    Vision(#[from] vision::VisionError),

    #[error(transparent)]
    GroundTruth(#[from] eval::GroundTruthError),
}

//! Whole-frame observation: segmentation plus classification of all squares.

use crate::segment::mask_frame;
use crate::{ClassifierParams, ForegroundSegmenter, SegmentParams, SquareClassifier, VisionError};
use draughts_core::{BoardGeometry, FrameObservation, GrayImage, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Turns canonical frames into [`FrameObservation`]s against a fixed background.
#[derive(Clone, Debug)]
pub struct FrameObserver {
    background: RgbImage,
    segmenter: ForegroundSegmenter,
    classifier: SquareClassifier,
}

/// Intermediate images of one observation, kept for reports and debugging.
#[derive(Clone, Debug)]
pub struct ObservationDetail {
    pub observation: FrameObservation,
    pub mask: GrayImage,
    pub pieces: RgbImage,
}

impl FrameObserver {
    pub fn new(
        background: RgbImage,
        segment: SegmentParams,
        classify: ClassifierParams,
        geometry: BoardGeometry,
    ) -> Result<Self, VisionError> {
        let side = geometry.board_px() as usize;
        if background.width != side || background.height != side {
            return Err(VisionError::NotCanonical {
                side,
                width: background.width,
                height: background.height,
            });
        }
        Ok(Self {
            background,
            segmenter: ForegroundSegmenter::new(segment),
            classifier: SquareClassifier::new(classify, geometry)?,
        })
    }

    #[inline]
    pub fn classifier(&self) -> &SquareClassifier {
        &self.classifier
    }

    #[inline]
    pub fn background(&self) -> &RgbImage {
        &self.background
    }

    pub fn observe(&self, frame: &RgbImageView<'_>) -> Result<FrameObservation, VisionError> {
        Ok(self.observe_detailed(frame)?.observation)
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn observe_detailed(&self, frame: &RgbImageView<'_>) -> Result<ObservationDetail, VisionError> {
        let mask = self.segmenter.segment(&self.background.view(), frame)?;
        let pieces = mask_frame(frame, &mask.view())?;
        let board = self.classifier.classify_board(&mask.view(), &pieces.view());
        let foreground_pixels = mask.count_nonzero();
        log::trace!(
            "observed {} pieces, {} foreground px",
            board.piece_count(),
            foreground_pixels
        );
        Ok(ObservationDetail {
            observation: FrameObservation {
                board,
                foreground_pixels,
            },
            mask,
            pieces,
        })
    }
}

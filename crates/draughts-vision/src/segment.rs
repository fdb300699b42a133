//! Background subtraction against the empty-board reference.

use crate::error::ensure_same_size;
use crate::gray::{absdiff_gray, threshold_binary};
use crate::morphology::{close, dilate, open};
use crate::{SegmentParams, VisionError};
use draughts_core::{GrayImage, GrayImageView, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Produces the binary foreground mask of a canonical frame.
#[derive(Clone, Debug, Default)]
pub struct ForegroundSegmenter {
    params: SegmentParams,
}

impl ForegroundSegmenter {
    pub fn new(params: SegmentParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &SegmentParams {
        &self.params
    }

    /// Mask with 255 where `frame` differs from `background`, 0 elsewhere.
    ///
    /// Deterministic: identical inputs always give byte-identical masks.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(width = frame.width, height = frame.height))
    )]
    pub fn segment(
        &self,
        background: &RgbImageView<'_>,
        frame: &RgbImageView<'_>,
    ) -> Result<GrayImage, VisionError> {
        ensure_same_size(
            (background.width, background.height),
            (frame.width, frame.height),
        )?;

        let mut mask = absdiff_gray(background, frame);
        threshold_binary(&mut mask, self.params.noise_threshold);

        let mut mask = open(&mask, self.params.open_kernel);
        for _ in 0..self.params.dilate_iterations {
            mask = dilate(&mask, self.params.dilate_kernel);
        }
        if let Some(k) = self.params.close_kernel {
            mask = close(&mask, k);
        }
        Ok(mask)
    }
}

/// Colour frame restricted to the mask; background pixels become black.
pub fn mask_frame(
    frame: &RgbImageView<'_>,
    mask: &GrayImageView<'_>,
) -> Result<RgbImage, VisionError> {
    ensure_same_size((frame.width, frame.height), (mask.width, mask.height))?;
    let mut out = RgbImage::new(frame.width, frame.height);
    for (i, (&m, px)) in mask.data.iter().zip(frame.data.chunks_exact(3)).enumerate() {
        if m != 0 {
            out.data[i * 3..i * 3 + 3].copy_from_slice(px);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_disc(cx: usize, cy: usize, r: usize) -> (RgbImage, RgbImage) {
        let background = RgbImage::filled(64, 64, [40, 90, 40]);
        let mut frame = background.clone();
        for y in 0..64usize {
            for x in 0..64usize {
                let dx = x as i64 - cx as i64;
                let dy = y as i64 - cy as i64;
                if dx * dx + dy * dy <= (r * r) as i64 {
                    frame.put_pixel(x, y, [90, 50, 30]);
                }
            }
        }
        (background, frame)
    }

    #[test]
    fn identical_images_give_empty_mask() {
        let bg = RgbImage::filled(16, 16, [10, 20, 30]);
        let mask = ForegroundSegmenter::default()
            .segment(&bg.view(), &bg.view())
            .unwrap();
        assert_eq!(mask.count_nonzero(), 0);
    }

    #[test]
    fn disc_is_segmented_and_grown() {
        let (bg, frame) = board_with_disc(32, 32, 10);
        let seg = ForegroundSegmenter::default();
        let mask = seg.segment(&bg.view(), &frame.view()).unwrap();
        assert_eq!(mask.get(32, 32), 255);
        // two 5x5 dilations grow the disc by 4 px
        assert_eq!(mask.get(32, 32 + 12), 255);
        assert_eq!(mask.get(32, 32 + 16), 0);
        assert_eq!(mask.get(0, 0), 0);
    }

    #[test]
    fn segmentation_is_idempotent() {
        let (bg, frame) = board_with_disc(20, 40, 8);
        let seg = ForegroundSegmenter::new(SegmentParams::king_aware());
        let a = seg.segment(&bg.view(), &frame.view()).unwrap();
        let b = seg.segment(&bg.view(), &frame.view()).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let a = RgbImage::new(10, 10);
        let b = RgbImage::new(10, 12);
        let err = ForegroundSegmenter::default()
            .segment(&a.view(), &b.view())
            .unwrap_err();
        assert!(matches!(err, VisionError::SizeMismatch { height: 12, .. }));
    }

    #[test]
    fn masked_frame_keeps_only_foreground() {
        let frame = RgbImage::filled(2, 1, [7, 8, 9]);
        let mask = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        let out = mask_frame(&frame.view(), &mask.view()).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [7, 8, 9]);
    }
}

//! Camera frame to canonical board frame.

use crate::core::{warp_perspective_rgb, BoardCorners, BoardGeometry, Homography, RgbImage, RgbImageView};
use crate::AnalysisError;

/// Perspective warp from the camera image onto the canonical board.
#[derive(Clone, Copy, Debug)]
pub struct BoardRectifier {
    h_img_from_board: Homography,
    side: usize,
}

impl BoardRectifier {
    pub fn new(corners: &BoardCorners, geometry: BoardGeometry) -> Result<Self, AnalysisError> {
        let side = geometry.board_px();
        let h_img_from_board = corners
            .board_to_image(side)
            .ok_or(AnalysisError::DegenerateCorners)?;
        Ok(Self {
            h_img_from_board,
            side: side as usize,
        })
    }

    pub fn rectify(&self, frame: &RgbImageView<'_>) -> RgbImage {
        warp_perspective_rgb(frame, self.h_img_from_board, self.side, self.side)
    }
}

/// Apply the rectifier when one is configured; otherwise frames are
/// expected to be canonical already.
pub fn canonical_frame(rectifier: Option<&BoardRectifier>, frame: RgbImage) -> RgbImage {
    match rectifier {
        Some(r) => r.rectify(&frame.view()),
        None => frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_at_board_extent_give_identity_warp() {
        let geometry = BoardGeometry { square_px: 4 };
        let corners = BoardCorners {
            top_left: [0.0, 0.0],
            bottom_left: [0.0, 32.0],
            top_right: [32.0, 0.0],
            bottom_right: [32.0, 32.0],
        };
        let r = BoardRectifier::new(&corners, geometry).unwrap();
        let mut src = RgbImage::filled(32, 32, [10, 20, 30]);
        src.put_pixel(5, 7, [200, 0, 0]);
        let out = r.rectify(&src.view());
        assert_eq!((out.width, out.height), (32, 32));
        assert_eq!(out.pixel(5, 7), [200, 0, 0]);
        assert_eq!(out.pixel(20, 20), [10, 20, 30]);
    }

    #[test]
    fn collapsed_corners_are_rejected() {
        let corners = BoardCorners {
            top_left: [5.0, 5.0],
            bottom_left: [5.0, 5.0],
            top_right: [5.0, 5.0],
            bottom_right: [5.0, 5.0],
        };
        assert!(matches!(
            BoardRectifier::new(&corners, BoardGeometry::default()),
            Err(AnalysisError::DegenerateCorners)
        ));
    }

    #[test]
    fn missing_rectifier_passes_frames_through() {
        let frame = RgbImage::filled(400, 400, [1, 2, 3]);
        let out = canonical_frame(None, frame.clone());
        assert_eq!(out, frame);
    }
}

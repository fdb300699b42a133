//! Per-square occupancy, colour and king classification.

use crate::contour::{find_contours, largest_contour};
use crate::hue::HueHistogram;
use crate::{ClassifierParams, VisionError};
use draughts_core::{
    BoardGeometry, BoardState, Color, GrayImage, GrayImageView, Occupancy, RgbImageView, Square,
};

/// Classifies one square from the foreground mask and the masked colour frame.
#[derive(Clone, Debug)]
pub struct SquareClassifier {
    params: ClassifierParams,
    geometry: BoardGeometry,
}

impl SquareClassifier {
    pub fn new(params: ClassifierParams, geometry: BoardGeometry) -> Result<Self, VisionError> {
        if params.black_bin >= params.hue_bins || params.white_bin >= params.hue_bins {
            return Err(VisionError::InvalidHueBins {
                bins: params.hue_bins,
                black_bin: params.black_bin,
                white_bin: params.white_bin,
            });
        }
        Ok(Self { params, geometry })
    }

    #[inline]
    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    #[inline]
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    fn rect(&self, square: Square) -> (usize, usize, usize) {
        let (x, y) = self.geometry.top_left(square);
        (x as usize, y as usize, self.geometry.square_px as usize)
    }

    /// Foreground pixels inside the square.
    pub fn foreground_in(&self, mask: &GrayImageView<'_>, square: Square) -> usize {
        let (x0, y0, side) = self.rect(square);
        let x1 = (x0 + side).min(mask.width);
        let y1 = (y0 + side).min(mask.height);
        (y0..y1)
            .map(|y| {
                let row = &mask.data[y * mask.width..(y + 1) * mask.width];
                row[x0.min(x1)..x1].iter().filter(|&&v| v != 0).count()
            })
            .sum()
    }

    /// A piece is present when more than `occupancy_fraction` of the square is foreground.
    pub fn is_occupied(&self, mask: &GrayImageView<'_>, square: Square) -> bool {
        let limit = self.params.occupancy_fraction * self.geometry.square_area() as f64;
        self.foreground_in(mask, square) as f64 > limit
    }

    /// Black iff the black-hue bin strictly exceeds the white-hue bin.
    ///
    /// Ties fall to white. `pieces` is the colour frame with background zeroed,
    /// so board pixels collect in bin 0 and stay out of the comparison.
    pub fn piece_color(&self, pieces: &RgbImageView<'_>, square: Square) -> Color {
        let (x0, y0, side) = self.rect(square);
        let hist =
            HueHistogram::of_region(pieces, x0, y0, side, side, self.params.hue_bins).normalized();
        if hist.get(self.params.black_bin) > hist.get(self.params.white_bin) {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Circularity of the largest blob in the square's mask, or `None` if it is empty.
    pub fn circularity(&self, mask: &GrayImageView<'_>, square: Square) -> Option<f64> {
        let (x0, y0, side) = self.rect(square);
        let w = side.min(mask.width.saturating_sub(x0));
        let h = side.min(mask.height.saturating_sub(y0));
        if w == 0 || h == 0 {
            return None;
        }
        let mut sub = GrayImage::new(w, h);
        for y in 0..h {
            let src = &mask.data[(y0 + y) * mask.width + x0..][..w];
            sub.data[y * w..(y + 1) * w].copy_from_slice(src);
        }
        let contours = find_contours(&sub);
        largest_contour(&contours).map(|c| c.circularity())
    }

    pub fn is_king(&self, mask: &GrayImageView<'_>, square: Square) -> bool {
        self.circularity(mask, square)
            .is_some_and(|c| c < self.params.king_circularity)
    }

    pub fn classify_square(
        &self,
        mask: &GrayImageView<'_>,
        pieces: &RgbImageView<'_>,
        square: Square,
    ) -> Occupancy {
        if !self.is_occupied(mask, square) {
            return Occupancy::Empty;
        }
        let color = self.piece_color(pieces, square);
        let king = self.params.king_aware && self.is_king(mask, square);
        Occupancy::piece(color, king)
    }

    pub fn classify_board(&self, mask: &GrayImageView<'_>, pieces: &RgbImageView<'_>) -> BoardState {
        let mut board = BoardState::empty();
        for square in Square::all() {
            board.set(square, self.classify_square(mask, pieces, square));
        }
        board
    }
}

//! Projective mapping between the canonical board and the camera image.
//!
//! The board is a square, so the mapping is solved in closed form from the
//! four corner positions (unit square to quadrilateral) instead of a
//! general point-correspondence fit.

use crate::{sample_bilinear_rgb, RgbImage, RgbImageView};
use nalgebra::{Matrix3, Point2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Determinants below this are treated as a collapsed board outline.
const MIN_DETERMINANT: f64 = 1e-9;

/// 3×3 projective transform acting on homogeneous 2D points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        Point2::new((v.x / v.z) as f32, (v.y / v.z) as f32)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

/// Image positions of the four outer board corners, as seen by the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCorners {
    pub top_left: [f32; 2],
    pub bottom_left: [f32; 2],
    pub top_right: [f32; 2],
    pub bottom_right: [f32; 2],
}

impl Default for BoardCorners {
    /// Calibration of the fixed camera used for the recorded sessions.
    fn default() -> Self {
        Self {
            top_left: [114.0, 17.0],
            bottom_left: [53.0, 245.0],
            top_right: [355.0, 20.0],
            bottom_right: [433.0, 241.0],
        }
    }
}

impl BoardCorners {
    /// Transform taking the unit square onto the corner quadrilateral:
    /// `(0,0)` to top-left, `(1,0)` to top-right, `(1,1)` to bottom-right
    /// and `(0,1)` to bottom-left.
    fn unit_square_to_image(&self) -> Option<Matrix3<f64>> {
        let [x0, y0] = self.top_left.map(f64::from);
        let [x1, y1] = self.top_right.map(f64::from);
        let [x2, y2] = self.bottom_right.map(f64::from);
        let [x3, y3] = self.bottom_left.map(f64::from);

        // zero when the outline is a parallelogram
        let sx = x0 - x1 + x2 - x3;
        let sy = y0 - y1 + y2 - y3;

        let (g, h) = if sx.abs() < f64::EPSILON && sy.abs() < f64::EPSILON {
            (0.0, 0.0)
        } else {
            let (dx1, dy1) = (x1 - x2, y1 - y2);
            let (dx2, dy2) = (x3 - x2, y3 - y2);
            let den = dx1 * dy2 - dx2 * dy1;
            if den.abs() < MIN_DETERMINANT {
                return None;
            }
            ((sx * dy2 - dx2 * sy) / den, (dx1 * sy - sx * dy1) / den)
        };

        let m = Matrix3::new(
            x1 - x0 + g * x1, x3 - x0 + h * x3, x0, //
            y1 - y0 + g * y1, y3 - y0 + h * y3, y0, //
            g, h, 1.0,
        );
        (m.determinant().abs() >= MIN_DETERMINANT).then_some(m)
    }

    /// Homography mapping board pixels `[0, side]^2` into the camera image.
    ///
    /// `None` when three or more corners coincide or line up.
    pub fn board_to_image(&self, side: u32) -> Option<Homography> {
        if side == 0 {
            return None;
        }
        let inv_side = 1.0 / side as f64;
        let scale = Matrix3::new_nonuniform_scaling(&Vector2::new(inv_side, inv_side));
        self.unit_square_to_image().map(|m| Homography::new(m * scale))
    }
}

/// Warp into board space: each output pixel `(x, y)` is mapped through
/// `h_img_from_board` and sampled bilinearly from `src`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src, h_img_from_board))
)]
pub fn warp_perspective_rgb(
    src: &RgbImageView<'_>,
    h_img_from_board: Homography,
    out_w: usize,
    out_h: usize,
) -> RgbImage {
    let mut out = RgbImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let pi = h_img_from_board.apply(Point2::new(x as f32, y as f32));
            out.put_pixel(x, y, sample_bilinear_rgb(src, pi.x, pi.y));
        }
    }
    out
}

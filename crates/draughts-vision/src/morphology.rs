//! Binary morphology with square `k×k` kernels, on top of `imageproc`.
//!
//! Kernels are centred, so even sizes act like the next odd size. Pixels
//! outside the image count as neither foreground nor background, so
//! borders neither grow nor shrink artificially.

use crate::gray::{from_luma_image, to_luma_image};
use draughts_core::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

type Op = fn(&image::GrayImage, Norm, u8) -> image::GrayImage;

fn apply(src: &GrayImage, k: usize, op: Op) -> GrayImage {
    if k <= 1 || src.width == 0 || src.height == 0 {
        return src.clone();
    }
    // L∞ distance k/2 covers exactly the k×k square around a pixel
    let radius = u8::try_from(k / 2).unwrap_or(u8::MAX);
    from_luma_image(op(&to_luma_image(src), Norm::LInf, radius))
}

pub fn erode(src: &GrayImage, k: usize) -> GrayImage {
    apply(src, k, morphology::erode)
}

pub fn dilate(src: &GrayImage, k: usize) -> GrayImage {
    apply(src, k, morphology::dilate)
}

/// Erosion followed by dilation; removes specks smaller than the kernel.
pub fn open(src: &GrayImage, k: usize) -> GrayImage {
    apply(src, k, morphology::open)
}

/// Dilation followed by erosion; fills gaps smaller than the kernel.
pub fn close(src: &GrayImage, k: usize) -> GrayImage {
    apply(src, k, morphology::close)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(w: usize, h: usize, x0: usize, y0: usize, side: usize) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.set(x, y, 255);
            }
        }
        img
    }

    #[test]
    fn opening_removes_isolated_pixels() {
        let mut img = square_mask(20, 20, 5, 5, 6);
        img.set(0, 19, 255);
        img.set(15, 2, 255);
        let opened = open(&img, 3);
        assert_eq!(opened, square_mask(20, 20, 5, 5, 6));
    }

    #[test]
    fn dilation_grows_by_half_kernel() {
        let img = square_mask(20, 20, 8, 8, 2);
        let grown = dilate(&img, 5);
        assert_eq!(grown, square_mask(20, 20, 6, 6, 6));
        assert_eq!(grown.count_nonzero(), 36);
    }

    #[test]
    fn borders_are_not_eroded() {
        let full = square_mask(6, 6, 0, 0, 6);
        assert_eq!(erode(&full, 3), full);
    }

    #[test]
    fn closing_bridges_one_pixel_gap() {
        let mut img = square_mask(12, 5, 1, 1, 3);
        for y in 1..4 {
            for x in 5..8 {
                img.set(x, y, 255);
            }
        }
        assert_eq!(img.get(4, 2), 0);
        let closed = close(&img, 3);
        assert_eq!(closed.get(4, 2), 255);
    }

    #[test]
    fn unit_kernel_is_identity() {
        let img = square_mask(8, 8, 2, 2, 3);
        assert_eq!(dilate(&img, 1), img);
        assert_eq!(erode(&img, 0), img);
    }
}

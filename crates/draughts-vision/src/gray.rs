//! Grayscale conversion and thresholding.

use draughts_core::{GrayImage, RgbImageView};

/// BT.601 luma in 14-bit fixed point, rounded.
#[inline]
pub fn luma(rgb: [u8; 3]) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((rgb[0] as u32 * R + rgb[1] as u32 * G + rgb[2] as u32 * B + (1 << 13)) >> 14) as u8
}

pub fn to_gray(src: &RgbImageView<'_>) -> GrayImage {
    let data = src
        .data
        .chunks_exact(3)
        .map(|p| luma([p[0], p[1], p[2]]))
        .collect();
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

/// Per-channel absolute difference of two same-size images, then luma.
///
/// Callers check sizes.
pub(crate) fn absdiff_gray(a: &RgbImageView<'_>, b: &RgbImageView<'_>) -> GrayImage {
    let data = a
        .data
        .chunks_exact(3)
        .zip(b.data.chunks_exact(3))
        .map(|(p, q)| {
            luma([
                p[0].abs_diff(q[0]),
                p[1].abs_diff(q[1]),
                p[2].abs_diff(q[2]),
            ])
        })
        .collect();
    GrayImage {
        width: a.width,
        height: a.height,
        data,
    }
}

/// Copy into an `image` buffer for the `imageproc` operators.
pub(crate) fn to_luma_image(src: &GrayImage) -> image::GrayImage {
    image::GrayImage::from_fn(src.width as u32, src.height as u32, |x, y| {
        image::Luma([src.get(x as usize, y as usize)])
    })
}

pub(crate) fn from_luma_image(img: image::GrayImage) -> GrayImage {
    GrayImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.into_raw(),
    }
}

/// Binary threshold in place: `> thresh` becomes 255, everything else 0.
pub fn threshold_binary(img: &mut GrayImage, thresh: u8) {
    for v in &mut img.data {
        *v = if *v > thresh { 255 } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draughts_core::RgbImage;

    #[test]
    fn luma_matches_fixed_point_weights() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
    }

    #[test]
    fn absdiff_is_symmetric() {
        let a = RgbImage::filled(2, 2, [200, 10, 50]);
        let b = RgbImage::filled(2, 2, [10, 200, 60]);
        let ab = absdiff_gray(&a.view(), &b.view());
        let ba = absdiff_gray(&b.view(), &a.view());
        assert_eq!(ab, ba);
        assert_eq!(ab.get(0, 0), luma([190, 190, 10]));
    }

    #[test]
    fn luma_image_conversion_keeps_layout() {
        let img = GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let luma = to_luma_image(&img);
        assert_eq!(luma.get_pixel(2, 0).0, [3]);
        assert_eq!(luma.get_pixel(0, 1).0, [4]);
        assert_eq!(from_luma_image(luma), img);
    }

    #[test]
    fn threshold_is_strict() {
        let mut img = GrayImage::from_raw(3, 1, vec![30, 31, 0]).unwrap();
        threshold_binary(&mut img, 30);
        assert_eq!(img.data, vec![0, 255, 0]);
    }
}

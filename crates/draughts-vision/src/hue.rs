//! 8-bit HSV hue and hue histograms.

use draughts_core::RgbImageView;
use palette::{Hsv, IntoColor, Srgb};

/// Exclusive upper bound of 8-bit hue values (degrees / 2).
pub const HUE_RANGE: u32 = 180;

/// Hue of an RGB pixel in half-degrees, `0..=180`. Achromatic pixels map to 0.
pub fn hue_8bit(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb;
    let hsv: Hsv = Srgb::new(r, g, b).into_format::<f32>().into_color();
    if hsv.saturation <= 0.0 {
        return 0;
    }
    (hsv.hue.into_positive_degrees() / 2.0).round() as u8
}

/// Uniform hue histogram over `[0, 180)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HueHistogram {
    pub bins: Vec<f32>,
}

impl HueHistogram {
    /// Histogram of the pixels in the rectangle `(x0, y0, w, h)`, clipped to the image.
    pub fn of_region(
        img: &RgbImageView<'_>,
        x0: usize,
        y0: usize,
        w: usize,
        h: usize,
        bins: usize,
    ) -> Self {
        let mut counts = vec![0f32; bins];
        let x1 = (x0 + w).min(img.width);
        let y1 = (y0 + h).min(img.height);
        if bins > 0 {
            for y in y0..y1 {
                for x in x0..x1 {
                    let hue = hue_8bit(img.pixel(x, y)) as u32;
                    if hue < HUE_RANGE {
                        counts[(hue as usize * bins) / HUE_RANGE as usize] += 1.0;
                    }
                }
            }
        }
        Self { bins: counts }
    }

    /// Min-max normalisation to `[0, 255]`. A flat histogram becomes all zeros.
    pub fn normalized(mut self) -> Self {
        let min = self.bins.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.bins.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let span = max - min;
        let scale = if span > f32::EPSILON { 255.0 / span } else { 0.0 };
        for v in &mut self.bins {
            *v = (*v - min) * scale;
        }
        self
    }

    #[inline]
    pub fn get(&self, bin: usize) -> f32 {
        self.bins.get(bin).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use draughts_core::RgbImage;

    #[test]
    fn hue_of_primaries_and_piece_colours() {
        assert_eq!(hue_8bit([255, 0, 0]), 0);
        assert_eq!(hue_8bit([0, 255, 0]), 60);
        assert_eq!(hue_8bit([0, 0, 255]), 120);
        assert_eq!(hue_8bit([128, 128, 128]), 0);
        assert_eq!(hue_8bit([90, 50, 30]), 10);
        assert_eq!(hue_8bit([230, 200, 150]), 19);
    }

    #[test]
    fn histogram_bins_and_normalises() {
        let mut img = RgbImage::new(4, 1);
        img.put_pixel(1, 0, [90, 50, 30]);
        img.put_pixel(2, 0, [90, 50, 30]);
        img.put_pixel(3, 0, [230, 200, 150]);
        let hist = HueHistogram::of_region(&img.view(), 0, 0, 4, 1, 25);
        assert_eq!(hist.bins.len(), 25);
        assert_relative_eq!(hist.get(0), 1.0);
        assert_relative_eq!(hist.get(1), 2.0);
        assert_relative_eq!(hist.get(2), 1.0);

        let norm = hist.normalized();
        assert_relative_eq!(norm.get(1), 255.0);
        assert_relative_eq!(norm.get(2), 127.5);
        assert_relative_eq!(norm.get(24), 0.0);
    }

    #[test]
    fn flat_histogram_normalises_to_zero() {
        let hist = HueHistogram { bins: vec![3.0; 4] }.normalized();
        assert!(hist.bins.iter().all(|&v| v == 0.0));
    }
}

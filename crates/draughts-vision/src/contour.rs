//! Outer contours of binary blobs and their shape descriptors.

use crate::gray::to_luma_image;
use draughts_core::GrayImage;
use imageproc::contours::{self, BorderType};
use imageproc::geometry::arc_length;
use imageproc::point::Point;
use std::f64::consts::PI;

/// Closed outer boundary of one 8-connected component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    /// Enclosed polygon area (shoelace).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice.abs() as f64 / 2.0
    }

    /// Closed arc length.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        arc_length(&self.points, true)
    }

    /// `4π·area / perimeter²`; 1 for a perfect disc, 0 for degenerate contours.
    pub fn circularity(&self) -> f64 {
        let p = self.perimeter();
        if p <= 0.0 {
            return 0.0;
        }
        4.0 * PI * self.area() / (p * p)
    }
}

/// Outer contours of every 8-connected component, in raster order of their
/// first pixel. Hole boundaries are dropped.
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    contours::find_contours::<i32>(&to_luma_image(mask))
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer))
        .map(|c| Contour { points: c.points })
        .collect()
}

/// Contour with the largest enclosed area; the first one wins ties.
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    contours.iter().fold(None, |best: Option<&Contour>, c| match best {
        Some(b) if b.area() >= c.area() => Some(b),
        _ => Some(c),
    })
}

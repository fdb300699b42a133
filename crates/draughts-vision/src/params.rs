use serde::{Deserialize, Serialize};

/// Foreground segmentation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// Grayscale difference a pixel must exceed to count as foreground.
    pub noise_threshold: u8,
    /// Side of the square kernel used for the opening pass. `0` or `1` disables it.
    pub open_kernel: usize,
    /// Side of the square kernel used for dilation.
    pub dilate_kernel: usize,
    /// Number of dilation passes after the opening.
    pub dilate_iterations: usize,
    /// Optional closing applied last; fills gaps between the two discs of a king.
    pub close_kernel: Option<usize>,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            noise_threshold: 30,
            open_kernel: 3,
            dilate_kernel: 5,
            dilate_iterations: 2,
            close_kernel: None,
        }
    }
}

impl SegmentParams {
    /// Preset used together with king-aware classification.
    pub fn king_aware() -> Self {
        Self {
            close_kernel: Some(3),
            ..Self::default()
        }
    }
}

/// Per-square classification parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Fraction of the square area that must be foreground for a piece to be present.
    pub occupancy_fraction: f64,
    /// Number of hue histogram bins over `[0, 180)`.
    pub hue_bins: usize,
    /// Bin collecting black-piece hue.
    pub black_bin: usize,
    /// Bin collecting white-piece hue.
    pub white_bin: usize,
    /// Circularity below which an occupied square is reported as a king.
    pub king_circularity: f64,
    /// Distinguish kings from men.
    pub king_aware: bool,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            occupancy_fraction: 0.25,
            hue_bins: 25,
            black_bin: 1,
            white_bin: 2,
            king_circularity: 0.80,
            king_aware: false,
        }
    }
}

impl ClassifierParams {
    pub fn king_aware() -> Self {
        Self {
            king_aware: true,
            ..Self::default()
        }
    }
}

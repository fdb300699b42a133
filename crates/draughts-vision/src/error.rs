/// Errors returned by the vision stages.
///
/// Ambiguous classifications are never errors; only malformed inputs are.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VisionError {
    #[error("image size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    SizeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    #[error("frame is {width}x{height}, canonical board is {side}x{side}")]
    NotCanonical {
        side: usize,
        width: usize,
        height: usize,
    },
    #[error("hue bins {black_bin}/{white_bin} outside histogram of {bins} bins")]
    InvalidHueBins {
        bins: usize,
        black_bin: usize,
        white_bin: usize,
    },
}

pub(crate) fn ensure_same_size(
    expected: (usize, usize),
    got: (usize, usize),
) -> Result<(), VisionError> {
    if expected != got {
        return Err(VisionError::SizeMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            width: got.0,
            height: got.1,
        });
    }
    Ok(())
}

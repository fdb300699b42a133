//! Frame sources feeding the video analysis loop.

use crate::core::RgbImage;
use crate::AnalysisError;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// A sequential supply of decoded camera frames.
///
/// `Ok(None)` marks the end of the stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AnalysisError>;
}

/// Frames already held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<RgbImage>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AnalysisError> {
        Ok(self.frames.pop_front())
    }
}

/// Throttles the loop to a playback rate.
///
/// The wait is the frame interval minus the time already spent on the
/// frame, and at least one millisecond.
#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    last: Instant,
}

impl FramePacer {
    /// `None` for a non-positive or non-finite rate, or one so slow that
    /// the interval does not fit a `Duration`.
    pub fn new(fps: f64) -> Option<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return None;
        }
        let interval = Duration::try_from_secs_f64(1.0 / fps).ok()?;
        Some(Self {
            interval,
            last: Instant::now(),
        })
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left to wait after `elapsed` of work on the current frame.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval
            .saturating_sub(elapsed)
            .max(Duration::from_millis(1))
    }

    pub fn wait(&mut self) {
        thread::sleep(self.remaining(self.last.elapsed()));
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_yields_in_order_then_ends() {
        let mut src = MemorySource::new([
            RgbImage::filled(2, 2, [1, 1, 1]),
            RgbImage::filled(2, 2, [2, 2, 2]),
        ]);
        assert_eq!(src.len(), 2);
        assert_eq!(src.next_frame().unwrap().unwrap().pixel(0, 0), [1, 1, 1]);
        assert_eq!(src.next_frame().unwrap().unwrap().pixel(0, 0), [2, 2, 2]);
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn pacer_waits_the_rest_of_the_interval() {
        let p = FramePacer::new(20.0).unwrap();
        assert_eq!(p.interval(), Duration::from_millis(50));
        assert_eq!(p.remaining(Duration::from_millis(15)), Duration::from_millis(35));
        assert_eq!(p.remaining(Duration::from_millis(90)), Duration::from_millis(1));
        assert!(FramePacer::new(0.0).is_none());
        assert!(FramePacer::new(f64::NAN).is_none());
    }

    #[test]
    fn pacer_rejects_rates_with_unrepresentable_interval() {
        assert!(FramePacer::new(1e-300).is_none());
        assert!(FramePacer::new(f64::MIN_POSITIVE).is_none());
        let slow = FramePacer::new(0.5).unwrap();
        assert_eq!(slow.interval(), Duration::from_secs(2));
    }
}

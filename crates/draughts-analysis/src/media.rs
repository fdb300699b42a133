//! `image`-crate adapters: decoding stills and directories of frames.

use crate::core::{GrayImage, RgbImage, RgbImageView};
use crate::source::FrameSource;
use crate::AnalysisError;
use std::fs;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tif"];

/// Convert an `image::RgbImage` into the lightweight `draughts-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

pub fn from_image(img: ::image::RgbImage) -> RgbImage {
    RgbImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.into_raw(),
    }
}

/// Decode any supported still into RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, AnalysisError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| AnalysisError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(from_image(img.to_rgb8()))
}

pub fn save_rgb(path: impl AsRef<Path>, img: &RgbImage) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    let buf = ::image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or(crate::core::ImageBufferError::InvalidLength {
            expected: img.width * img.height * 3,
            got: img.data.len(),
        })?;
    buf.save(path).map_err(|source| AnalysisError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a binary mask as an 8-bit grayscale image.
pub fn save_gray(path: impl AsRef<Path>, img: &GrayImage) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    let buf = ::image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or(crate::core::ImageBufferError::InvalidLength {
            expected: img.width * img.height,
            got: img.data.len(),
        })?;
    buf.save(path).map_err(|source| AnalysisError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// Still frames from one directory, read in file-name order.
#[derive(Clone, Debug)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequence {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if is_frame_file(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(AnalysisError::NoFrames(dir.to_path_buf()));
        }
        paths.sort();
        log::info!("{} frames in {}", paths.len(), dir.display());
        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AnalysisError> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        load_rgb(path).map(Some)
    }
}

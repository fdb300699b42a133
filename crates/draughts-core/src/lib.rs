//! Core types for draughts board analysis.
//!
//! Square numbering, board snapshots, image buffers and the perspective
//! mapping onto the canonical board. This crate does not decode images and
//! does not depend on any vision algorithm.

mod board;
mod homography;
mod image;
mod logger;
mod square;

pub use board::{BoardState, Color, FrameObservation, Occupancy};
pub use homography::{warp_perspective_rgb, BoardCorners, Homography};
pub use image::{
    sample_bilinear_rgb, GrayImage, GrayImageView, ImageBufferError, RgbImage, RgbImageView,
};
pub use square::{
    BoardGeometry, Cell, Diagonal, Square, SquareError, NUMBER_OF_SQUARES, SQUARES_PER_SIDE,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

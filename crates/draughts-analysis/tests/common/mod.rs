#![allow(dead_code)]

use draughts_analysis::core::{BoardGeometry, BoardState, Color, RgbImage};

pub const DARK: [u8; 3] = [40, 90, 40];
pub const LIGHT: [u8; 3] = [200, 170, 120];
pub const BLACK_PIECE: [u8; 3] = [90, 50, 30];
pub const WHITE_PIECE: [u8; 3] = [230, 200, 150];

/// Canonical 400x400 empty board.
pub fn empty_board() -> RgbImage {
    let g = BoardGeometry::default();
    let side = g.board_px() as usize;
    let s = g.square_px as usize;
    let mut img = RgbImage::new(side, side);
    for y in 0..side {
        for x in 0..side {
            let dark = (x / s + y / s) % 2 == 1;
            img.put_pixel(x, y, if dark { DARK } else { LIGHT });
        }
    }
    img
}

/// Empty board with a disc painted on every occupied square.
pub fn paint(board: &BoardState) -> RgbImage {
    let g = BoardGeometry::default();
    let mut img = empty_board();
    for (square, piece) in board.iter() {
        let rgb = match piece.color() {
            Some(Color::White) => WHITE_PIECE,
            Some(Color::Black) => BLACK_PIECE,
            None => continue,
        };
        let (x0, y0) = g.top_left(square);
        let (cx, cy) = (x0 as i64 + 25, y0 as i64 + 25);
        for y in y0 as i64..y0 as i64 + 50 {
            for x in x0 as i64..x0 as i64 + 50 {
                if (x - cx).pow(2) + (y - cy).pow(2) <= 18 * 18 {
                    img.put_pixel(x as usize, y as usize, rgb);
                }
            }
        }
    }
    img
}

/// Save a core image as PNG.
pub fn write_png(path: &std::path::Path, img: &RgbImage) {
    image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .unwrap()
        .save(path)
        .unwrap();
}

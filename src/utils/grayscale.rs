//! RGBA to luminance conversion.
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, using fast integer arithmetic:
//! Y = (76*R + 150*G + 29*B) >> 8

use crate::models::pixel_grid::CHANNELS;
use crate::models::{LuminanceMap, PixelGrid};
use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Luminance of one RGBA sample, composited over a white background
#[inline]
pub fn rgba_luma(px: [u8; 4]) -> u8 {
    let [r, g, b, a] = px.map(u32::from);
    let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
    if a == 255 {
        return lum.min(255) as u8;
    }
    // Transparent regions read as paper.
    ((lum * a + 255 * (255 - a)) / 255).min(255) as u8
}

/// Convert a pixel grid into a luminance map, processing rows in parallel
pub fn to_luminance(grid: &PixelGrid) -> LuminanceMap {
    let width = grid.width();
    let height = grid.height();
    let rgba = grid.as_bytes();
    let mut gray = vec![0u8; width * height];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src = &rgba[y * width * CHANNELS..(y + 1) * width * CHANNELS];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(CHANNELS)) {
            *dst = rgba_luma([px[0], px[1], px[2], px[3]]);
        }
    });

    LuminanceMap::from_parts(width, height, gray)
}

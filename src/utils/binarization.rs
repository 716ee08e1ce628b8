//! Block-adaptive binarization.
//!
//! The luminance map is tiled into square blocks. Each block gets a black
//! point from its own statistics, and each pixel is compared against the mean
//! black point of the 5x5 block neighbourhood around its block. This keeps
//! dark-on-light symbols readable under uneven lighting where a single global
//! threshold fails.

use crate::config::RecognizerConfig;
use crate::error::{RecognizeError, Result};
use crate::models::{BitMatrix, LuminanceMap};

/// Radius, in blocks, of the neighbourhood averaged into a threshold
const NEIGHBOURHOOD_RADIUS: usize = 2;

/// Binarize with the block size and dynamic range from `config`
pub fn binarize(map: &LuminanceMap, config: &RecognizerConfig) -> Result<BitMatrix> {
    adaptive_binarize(map, config.block_size, config.min_dynamic_range)
}

/// Binarize a luminance map; `true` in the result marks a dark pixel.
///
/// Fails with [`RecognizeError::DegenerateImage`] when the map cannot hold a
/// single `block_size` x `block_size` block.
pub fn adaptive_binarize(
    map: &LuminanceMap,
    block_size: usize,
    min_dynamic_range: u8,
) -> Result<BitMatrix> {
    let width = map.width();
    let height = map.height();
    if block_size == 0 || width < block_size || height < block_size {
        return Err(RecognizeError::DegenerateImage {
            width,
            height,
            block_size,
        });
    }

    let sub_width = width.div_ceil(block_size);
    let sub_height = height.div_ceil(block_size);
    let black_points = block_black_points(map, block_size, sub_width, sub_height, min_dynamic_range);
    log::trace!(
        "binarize {}x{}: {}x{} blocks of {}px",
        width,
        height,
        sub_width,
        sub_height,
        block_size
    );

    let mut binary = BitMatrix::new(width, height);
    for by in 0..sub_height {
        let y0 = block_origin(by, block_size, height);
        let rows = neighbourhood(by, sub_height);
        for bx in 0..sub_width {
            let x0 = block_origin(bx, block_size, width);
            let cols = neighbourhood(bx, sub_width);

            let mut sum = 0u32;
            let mut count = 0u32;
            for ny in rows.clone() {
                for nx in cols.clone() {
                    sum += black_points[ny * sub_width + nx];
                    count += 1;
                }
            }
            let threshold = sum / count;

            for y in y0..y0 + block_size {
                let row = map.row(y);
                for x in x0..x0 + block_size {
                    binary.set(x, y, u32::from(row[x]) <= threshold);
                }
            }
        }
    }

    Ok(binary)
}

/// Top/left pixel of block `index`; the last block is shifted inward so it stays full-size
fn block_origin(index: usize, block_size: usize, extent: usize) -> usize {
    (index * block_size).min(extent - block_size)
}

fn neighbourhood(index: usize, blocks: usize) -> std::ops::Range<usize> {
    let start = index.saturating_sub(NEIGHBOURHOOD_RADIUS);
    let end = (index + NEIGHBOURHOOD_RADIUS + 1).min(blocks);
    start..end
}

/// Per-block black point, row-major over the block grid
fn block_black_points(
    map: &LuminanceMap,
    block_size: usize,
    sub_width: usize,
    sub_height: usize,
    min_dynamic_range: u8,
) -> Vec<u32> {
    let mut points = vec![0u32; sub_width * sub_height];
    let area = (block_size as u64) * (block_size as u64);

    for by in 0..sub_height {
        let y0 = block_origin(by, block_size, map.height());
        for bx in 0..sub_width {
            let x0 = block_origin(bx, block_size, map.width());

            let mut sum = 0u64;
            let mut min = u8::MAX;
            let mut max = u8::MIN;
            for y in y0..y0 + block_size {
                for &v in &map.row(y)[x0..x0 + block_size] {
                    sum += u64::from(v);
                    min = min.min(v);
                    max = max.max(v);
                }
            }

            let point = if max - min > min_dynamic_range {
                // Mean of u8 samples, always fits
                (sum / area) as u32
            } else {
                // Flat block: assume light background unless the neighbours
                // already established it sits inside a dark region.
                let mut point = u32::from(min) / 2;
                if by > 0 && bx > 0 {
                    let neighbours = (points[(by - 1) * sub_width + bx]
                        + 2 * points[by * sub_width + bx - 1]
                        + points[(by - 1) * sub_width + bx - 1])
                        / 4;
                    if u32::from(min) < neighbours {
                        point = neighbours;
                    }
                }
                point
            };
            points[by * sub_width + bx] = point;
        }
    }

    points
}

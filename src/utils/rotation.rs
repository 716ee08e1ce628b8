//! Quarter-turn rotation of pixel grids.
//!
//! Rotations are clockwise in image coordinates (y grows downward). Quarter
//! turns map every pixel centre exactly onto another pixel centre, so the
//! remap is lossless and needs no background fill.

use crate::error::{RecognizeError, Result};
use crate::models::PixelGrid;
use crate::models::pixel_grid::CHANNELS;
use rayon::prelude::*;
use std::fmt;

/// One of the four supported clockwise rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rotation {
    /// Identity
    Deg0,
    /// Quarter turn clockwise
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl Rotation {
    /// Search order used by the decode pipeline
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Angle in degrees
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the output swaps width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Source coordinate that lands on output `(x, y)`
    #[inline]
    fn source(self, x: usize, y: usize, src_width: usize, src_height: usize) -> (usize, usize) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, src_height - 1 - x),
            Rotation::Deg180 => (src_width - 1 - x, src_height - 1 - y),
            Rotation::Deg270 => (src_width - 1 - y, x),
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = RecognizeError;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(RecognizeError::InvalidAngle(other)),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotate `grid` clockwise by `degrees`, which must be 0, 90, 180 or 270
pub fn rotate(grid: &PixelGrid, degrees: u32) -> Result<PixelGrid> {
    Ok(rotate_by(grid, Rotation::try_from(degrees)?))
}

/// Rotate `grid` clockwise by a typed quarter-turn
pub fn rotate_by(grid: &PixelGrid, rotation: Rotation) -> PixelGrid {
    if rotation == Rotation::Deg0 {
        return grid.clone();
    }

    let src_width = grid.width();
    let src_height = grid.height();
    let (width, height) = if rotation.swaps_axes() {
        (src_height, src_width)
    } else {
        (src_width, src_height)
    };
    let src = grid.as_bytes();
    let mut out = vec![0u8; width * height * CHANNELS];

    out.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let (sx, sy) = rotation.source(x, y, src_width, src_height);
                let idx = (sy * src_width + sx) * CHANNELS;
                dst.copy_from_slice(&src[idx..idx + CHANNELS]);
            }
        });

    PixelGrid::from_parts(width, height, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grid whose red channel encodes the pixel index
    fn indexed_grid(width: usize, height: usize) -> PixelGrid {
        let data = (0..width * height)
            .flat_map(|i| [i as u8, 0, 0, 255])
            .collect();
        PixelGrid::from_rgba(width, height, data).unwrap()
    }

    fn reds(grid: &PixelGrid) -> Vec<u8> {
        grid.as_bytes().chunks_exact(CHANNELS).map(|p| p[0]).collect()
    }

    #[test]
    fn test_rotate_90_clockwise() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let grid = indexed_grid(3, 2);
        let rotated = rotate(&grid, 90).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(reds(&rotated), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_rotate_180() {
        let grid = indexed_grid(3, 2);
        let rotated = rotate(&grid, 180).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (3, 2));
        assert_eq!(reds(&rotated), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_rotate_270_clockwise() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let grid = indexed_grid(3, 2);
        let rotated = rotate(&grid, 270).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(reds(&rotated), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        let grid = indexed_grid(5, 3);
        let mut current = grid.clone();
        for _ in 0..4 {
            current = rotate(&current, 90).unwrap();
        }
        assert_eq!((current.width(), current.height()), (5, 3));
        assert_eq!(current, grid);
    }

    #[test]
    fn test_inverse_rotations() {
        let grid = indexed_grid(4, 7);
        let back = rotate(&rotate(&grid, 90).unwrap(), 270).unwrap();
        assert_eq!(back, grid);
        let twice = rotate(&rotate(&grid, 180).unwrap(), 180).unwrap();
        assert_eq!(twice, grid);
    }

    #[test]
    fn test_zero_is_copy() {
        let grid = indexed_grid(2, 2);
        assert_eq!(rotate(&grid, 0).unwrap(), grid);
    }

    #[test]
    fn test_invalid_angle() {
        let grid = indexed_grid(2, 2);
        for angle in [45, 360, 91, 1] {
            let err = rotate(&grid, angle).unwrap_err();
            assert!(matches!(err, RecognizeError::InvalidAngle(a) if a == angle));
        }
    }
}

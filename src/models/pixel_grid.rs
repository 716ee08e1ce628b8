use crate::error::{RecognizeError, Result};

/// Bytes per pixel in a [`PixelGrid`] (RGBA8)
pub const CHANNELS: usize = 4;

/// Decoded still image as interleaved RGBA8 samples.
///
/// The sample buffer always holds exactly `width * height * 4` bytes and
/// both dimensions are non-zero. The grid is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from raw RGBA8 samples
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RecognizeError::MalformedImage {
                reason: format!("zero-sized image ({width}x{height})"),
            });
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(RecognizeError::MalformedImage {
                reason: format!(
                    "sample buffer holds {} bytes, expected {expected} for {width}x{height}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid from raw RGB8 samples, adding an opaque alpha channel
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Result<Self> {
        if rgb.len() != width * height * 3 {
            return Err(RecognizeError::MalformedImage {
                reason: format!(
                    "RGB buffer holds {} bytes, expected {} for {width}x{height}",
                    rgb.len(),
                    width * height * 3
                ),
            });
        }
        let data = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
            .collect();
        Self::from_rgba(width, height, data)
    }

    /// Internal constructor for transforms that preserve the invariant
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA sample at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width + x) * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Interleaved RGBA samples, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

use crate::error::{RecognizeError, Result};

/// Single-channel intensity image, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceMap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl LuminanceMap {
    /// Wrap an owned intensity buffer; `data.len()` must equal `width * height`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(RecognizeError::MalformedImage {
                reason: format!(
                    "luminance buffer holds {} bytes, expected {} for {width}x{height}",
                    data.len(),
                    width * height
                ),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    /// Internal constructor for stages that size the buffer themselves
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Map width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at (x, y)
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// One row of intensities
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Raw row-major intensities
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Packed one-bit-per-pixel image produced by binarization.
///
/// `true` marks a dark (foreground) pixel, `false` a light one. Reads
/// outside the matrix are light and writes outside it are dropped, so
/// readers can probe neighbourhoods without bounds checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

impl BitMatrix {
    /// All-light matrix
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![0; (width * height).div_ceil(8)],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        (x < self.width && y < self.height).then(|| {
            let index = y * self.width + x;
            (index / 8, 1u8 << (index % 8))
        })
    }

    /// Whether (x, y) is dark
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.locate(x, y)
            .is_some_and(|(byte, mask)| self.bits[byte] & mask != 0)
    }

    /// Mark (x, y) dark or light
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        if let Some((byte, mask)) = self.locate(x, y) {
            if dark {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Number of dark pixels
    pub fn count_set(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Share of dark pixels, 0.0 for an empty matrix
    pub fn dark_ratio(&self) -> f64 {
        let total = self.width * self.height;
        if total == 0 {
            0.0
        } else {
            self.count_set() as f64 / total as f64
        }
    }
}

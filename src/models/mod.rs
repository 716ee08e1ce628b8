//! Data passed between pipeline stages

/// Symbologies and format filters
pub mod format;
/// Single-channel intensity maps
pub mod luminance;
/// Packed binarized bitmaps
pub mod matrix;
/// Decoded RGBA pixel grids
pub mod pixel_grid;
/// Decode results
pub mod symbol;

pub use format::{BarcodeFormat, FormatFilter};
pub use luminance::LuminanceMap;
pub use matrix::BitMatrix;
pub use pixel_grid::PixelGrid;
pub use symbol::{DecodeOutcome, Symbol};

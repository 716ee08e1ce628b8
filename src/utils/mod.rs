//! Image processing stages of the decode pipeline
//!
//! - Luminance conversion (RGBA to single-channel intensity)
//! - Block-adaptive binarization
//! - Quarter-turn rotation

/// Block-adaptive thresholding
pub mod binarization;
/// RGBA to luminance conversion
pub mod grayscale;
/// Quarter-turn rotation of pixel grids
pub mod rotation;

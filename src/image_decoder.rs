//! Container decoding: encoded image bytes to a [`PixelGrid`].

use crate::error::{RecognizeError, Result};
use crate::models::PixelGrid;

/// Decode a PNG/JPEG/GIF/BMP/... byte buffer into RGBA pixels.
///
/// The container format is sniffed from the leading bytes. Corrupt headers,
/// truncated data and zero-sized images all fail with
/// [`RecognizeError::MalformedImage`].
pub fn decode(bytes: &[u8]) -> Result<PixelGrid> {
    if bytes.is_empty() {
        return Err(RecognizeError::MalformedImage {
            reason: "empty image buffer".to_string(),
        });
    }

    let image = image::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {}x{} image from {} bytes", width, height, bytes.len());

    PixelGrid::from_rgba(width as usize, height as usize, rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn test_decode_png() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        img.put_pixel(1, 2, Rgb([10, 20, 30]));
        let grid = decode(&png_bytes(&img)).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.pixel(1, 2), [10, 20, 30, 255]);
        assert_eq!(grid.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_truncated_png_is_malformed() {
        let img = RgbImage::from_pixel(16, 16, Rgb([0, 0, 0]));
        let bytes = png_bytes(&img);
        let err = decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, RecognizeError::MalformedImage { .. }));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, RecognizeError::MalformedImage { .. }));
        let err = decode(&[]).unwrap_err();
        assert!(matches!(err, RecognizeError::MalformedImage { .. }));
    }
}

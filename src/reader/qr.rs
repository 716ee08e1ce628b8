//! QR Code backend built on `rqrr`.

use super::{ReadAttempt, SymbolReader};
use crate::models::{BarcodeFormat, BitMatrix};
use rqrr::PreparedImage;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Reads QR Code symbols (grid detection, error correction and payload
/// decoding are delegated to `rqrr`)
#[derive(Debug, Default, Clone, Copy)]
pub struct QrReader;

impl QrReader {
    /// Create a QR reader
    pub fn new() -> Self {
        Self
    }
}

impl SymbolReader for QrReader {
    fn format(&self) -> BarcodeFormat {
        BarcodeFormat::QrCode
    }

    fn read(&self, bitmap: &BitMatrix) -> ReadAttempt {
        // Already thresholded, so feed rqrr pure black/white samples.
        let mut prepared =
            PreparedImage::prepare_from_greyscale(bitmap.width(), bitmap.height(), |x, y| {
                if bitmap.get(x, y) { DARK } else { LIGHT }
            });
        let grids = prepared.detect_grids();
        if grids.is_empty() {
            return ReadAttempt::NotFound;
        }

        let mut last_error = None;
        for grid in &grids {
            match grid.decode() {
                Ok((meta, content)) => {
                    log::debug!(
                        "QR decoded: version={:?}, ecc_level={:?}, length={}",
                        meta.version,
                        meta.ecc_level,
                        content.len()
                    );
                    return ReadAttempt::Found {
                        text: content,
                        format: BarcodeFormat::QrCode,
                    };
                }
                Err(err) => last_error = Some(err),
            }
        }

        ReadAttempt::Rejected {
            format: BarcodeFormat::QrCode,
            reason: last_error
                .map(|e| format!("{e:?}"))
                .unwrap_or_else(|| "no decodable grid".to_string()),
        }
    }
}

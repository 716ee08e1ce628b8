//! Rotation search over the decode primitive.
//!
//! For each quarter turn in [`Rotation::ALL`] the image is rotated,
//! converted to luminance, binarized and handed to the reader set. The first
//! non-empty text ends the search; misses at one angle are recovered and the
//! next angle is tried.

use crate::config::RecognizerConfig;
use crate::error::Result;
use crate::image_decoder;
use crate::models::{DecodeOutcome, FormatFilter, PixelGrid, Symbol};
use crate::reader::{MultiFormatReader, ReadAttempt};
use crate::request::DecodeRequest;
use crate::utils::binarization::binarize;
use crate::utils::grayscale::to_luminance;
use crate::utils::rotation::{Rotation, rotate_by};

/// Counters collected while serving one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeTelemetry {
    /// Rotations for which the reader set ran
    pub angles_attempted: usize,
    /// Rotations that ended without a usable symbol, rejections included
    pub misses: usize,
    /// Rotations where a candidate was located but failed to decode
    pub rejected: usize,
    /// Rotation that produced the result, if any
    pub matched: Option<Rotation>,
}

/// Drives the bounded rotation search for decode requests.
///
/// Holds no per-request state, so one orchestrator may serve concurrent
/// requests from several threads.
pub struct DecodeOrchestrator {
    config: RecognizerConfig,
    reader: MultiFormatReader,
}

impl DecodeOrchestrator {
    /// Orchestrator with explicit configuration and reader set
    pub fn new(config: RecognizerConfig, reader: MultiFormatReader) -> Self {
        Self { config, reader }
    }

    /// Active configuration
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Registered readers
    pub fn reader(&self) -> &MultiFormatReader {
        &self.reader
    }

    /// Decode the image in `request`.
    ///
    /// Malformed image bytes and images too small to binarize are errors;
    /// a readable image with no symbol is `Ok(DecodeOutcome::NotFound)`.
    pub fn decode(&self, request: &DecodeRequest) -> Result<DecodeOutcome> {
        self.decode_with_telemetry(request).map(|(outcome, _)| outcome)
    }

    /// Like [`decode`](Self::decode) but also returns search counters
    pub fn decode_with_telemetry(
        &self,
        request: &DecodeRequest,
    ) -> Result<(DecodeOutcome, DecodeTelemetry)> {
        let grid = image_decoder::decode(&request.image)?;
        let filter = request.options.format_filter();
        self.decode_grid(&grid, &filter)
    }

    /// Run the rotation search over an already decoded grid
    pub fn decode_grid(
        &self,
        grid: &PixelGrid,
        filter: &FormatFilter,
    ) -> Result<(DecodeOutcome, DecodeTelemetry)> {
        let mut telemetry = DecodeTelemetry::default();

        for rotation in Rotation::ALL {
            telemetry.angles_attempted += 1;
            match self.attempt(grid, rotation, filter)? {
                ReadAttempt::Found { text, format } if !text.is_empty() => {
                    log::debug!("{} symbol found at {}", format, rotation);
                    telemetry.matched = Some(rotation);
                    let symbol = Symbol {
                        text,
                        format,
                        rotation,
                    };
                    return Ok((DecodeOutcome::Found(symbol), telemetry));
                }
                ReadAttempt::Found { format, .. } => {
                    telemetry.misses += 1;
                    log::debug!("{} symbol at {} carried no text", format, rotation);
                }
                ReadAttempt::NotFound => {
                    telemetry.misses += 1;
                    log::debug!("no symbol at {}", rotation);
                }
                ReadAttempt::Rejected { format, reason } => {
                    telemetry.misses += 1;
                    telemetry.rejected += 1;
                    log::warn!("{} candidate at {} rejected: {}", format, rotation, reason);
                }
            }
        }

        Ok((DecodeOutcome::NotFound, telemetry))
    }

    fn attempt(
        &self,
        grid: &PixelGrid,
        rotation: Rotation,
        filter: &FormatFilter,
    ) -> Result<ReadAttempt> {
        let rotated = rotate_by(grid, rotation);
        let luminance = to_luminance(&rotated);
        let bitmap = binarize(&luminance, &self.config)?;
        Ok(self.reader.decode(&bitmap, filter))
    }
}

impl Default for DecodeOrchestrator {
    fn default() -> Self {
        Self::new(*RecognizerConfig::global(), MultiFormatReader::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizeError;
    use crate::models::{BarcodeFormat, BitMatrix};
    use crate::reader::SymbolReader;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Recognizes a "symbol" when the top-left corner of the bitmap is dark
    /// and the bottom-right corner is light.
    struct CornerReader {
        calls: Arc<AtomicUsize>,
    }

    impl SymbolReader for CornerReader {
        fn format(&self) -> BarcodeFormat {
            BarcodeFormat::Aztec
        }

        fn read(&self, bitmap: &BitMatrix) -> ReadAttempt {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (w, h) = (bitmap.width(), bitmap.height());
            if bitmap.get(2, 2) && !bitmap.get(w - 3, h - 3) {
                ReadAttempt::Found {
                    text: "corner".to_string(),
                    format: BarcodeFormat::Aztec,
                }
            } else {
                ReadAttempt::NotFound
            }
        }
    }

    fn orchestrator() -> (DecodeOrchestrator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let reader = MultiFormatReader::empty().with_reader(CornerReader {
            calls: Arc::clone(&calls),
        });
        (
            DecodeOrchestrator::new(RecognizerConfig::default(), reader),
            calls,
        )
    }

    /// White 32x32 grid with an 8x8 dark square in the given corner block
    fn grid_with_dark_block(bx: usize, by: usize) -> PixelGrid {
        let size = 32;
        let mut data = Vec::with_capacity(size * size * 4);
        for y in 0..size {
            for x in 0..size {
                let dark = (bx * 24..bx * 24 + 8).contains(&x) && (by * 24..by * 24 + 8).contains(&y);
                let v = if dark { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelGrid::from_rgba(size, size, data).unwrap()
    }

    #[test]
    fn test_found_at_zero_stops_immediately() {
        let (orchestrator, calls) = orchestrator();
        let grid = grid_with_dark_block(0, 0);
        let (outcome, telemetry) = orchestrator
            .decode_grid(&grid, &FormatFilter::unrestricted())
            .unwrap();
        assert_eq!(outcome.symbol().map(|s| s.rotation), Some(Rotation::Deg0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(telemetry.angles_attempted, 1);
    }

    #[test]
    fn test_rotation_search_reaches_each_angle() {
        // Clockwise quarter turns bring bottom-left, bottom-right and
        // top-right corners to the top-left in that order.
        let cases = [
            ((0, 1), Rotation::Deg90, 2),
            ((1, 1), Rotation::Deg180, 3),
            ((1, 0), Rotation::Deg270, 4),
        ];
        for ((bx, by), expected, attempts) in cases {
            let (orchestrator, calls) = orchestrator();
            let grid = grid_with_dark_block(bx, by);
            let (outcome, telemetry) = orchestrator
                .decode_grid(&grid, &FormatFilter::unrestricted())
                .unwrap();
            let symbol = outcome.symbol().expect("symbol");
            assert_eq!(symbol.rotation, expected);
            assert_eq!(symbol.text, "corner");
            assert_eq!(calls.load(Ordering::SeqCst), attempts);
            assert_eq!(telemetry.misses, attempts - 1);
            assert_eq!(telemetry.matched, Some(expected));
        }
    }

    #[test]
    fn test_blank_exhausts_all_angles() {
        let (orchestrator, calls) = orchestrator();
        let grid = PixelGrid::from_rgba(32, 32, vec![255; 32 * 32 * 4]).unwrap();
        let (outcome, telemetry) = orchestrator
            .decode_grid(&grid, &FormatFilter::unrestricted())
            .unwrap();
        assert_eq!(outcome, DecodeOutcome::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(telemetry.angles_attempted, 4);
        assert_eq!(telemetry.misses, 4);
        assert_eq!(telemetry.matched, None);
    }

    /// Rejects whatever it sees on the first call, then reads successfully
    struct RejectOnceReader {
        calls: AtomicUsize,
    }

    impl SymbolReader for RejectOnceReader {
        fn format(&self) -> BarcodeFormat {
            BarcodeFormat::QrCode
        }

        fn read(&self, _bitmap: &BitMatrix) -> ReadAttempt {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                ReadAttempt::Rejected {
                    format: BarcodeFormat::QrCode,
                    reason: "checksum mismatch".to_string(),
                }
            } else {
                ReadAttempt::Found {
                    text: "second look".to_string(),
                    format: BarcodeFormat::QrCode,
                }
            }
        }
    }

    #[test]
    fn test_rejected_candidate_continues_search() {
        let orchestrator = DecodeOrchestrator::new(
            RecognizerConfig::default(),
            MultiFormatReader::empty().with_reader(RejectOnceReader {
                calls: AtomicUsize::new(0),
            }),
        );
        let grid = PixelGrid::from_rgba(32, 32, vec![255; 32 * 32 * 4]).unwrap();
        let (outcome, telemetry) = orchestrator
            .decode_grid(&grid, &FormatFilter::unrestricted())
            .unwrap();

        let symbol = outcome.symbol().expect("symbol");
        assert_eq!(symbol.text, "second look");
        assert_eq!(symbol.rotation, Rotation::Deg90);
        assert_eq!(
            telemetry,
            DecodeTelemetry {
                angles_attempted: 2,
                misses: 1,
                rejected: 1,
                matched: Some(Rotation::Deg90),
            }
        );
    }

    #[test]
    fn test_filter_excluding_reader() {
        let (orchestrator, calls) = orchestrator();
        let grid = grid_with_dark_block(0, 0);
        let filter: FormatFilter = [BarcodeFormat::QrCode].into_iter().collect();
        let (outcome, _) = orchestrator.decode_grid(&grid, &filter).unwrap();
        assert_eq!(outcome, DecodeOutcome::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_malformed_bytes_skip_search() {
        let (orchestrator, calls) = orchestrator();
        let request = DecodeRequest::new(vec![0x89, b'P', b'N', b'G'], Default::default());
        let err = orchestrator.decode(&request).unwrap_err();
        assert!(matches!(err, RecognizeError::MalformedImage { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_tiny_grid_is_degenerate() {
        let (orchestrator, calls) = orchestrator();
        let grid = PixelGrid::from_rgba(1, 1, vec![0, 0, 0, 255]).unwrap();
        let err = orchestrator
            .decode_grid(&grid, &FormatFilter::unrestricted())
            .unwrap_err();
        assert!(matches!(err, RecognizeError::DegenerateImage { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

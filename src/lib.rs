//! Local barcode recognizer
//!
//! Decodes a barcode symbol from an encoded still image (PNG, JPEG, ...).
//! The image is converted to luminance, binarized with a block-adaptive
//! threshold and handed to a symbol reader; if nothing is read, the search is
//! retried at 90, 180 and 270 degrees before giving up.
//!
//! ```no_run
//! use local_barcode_recognizer::{DecodeOptions, decode_base64};
//!
//! let payload = std::fs::read_to_string("qr.b64").unwrap();
//! let options = DecodeOptions::with_code_types(["qr"]);
//! let text = decode_base64(&payload, options).unwrap();
//! println!("{text}");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Pipeline configuration and environment overrides
pub mod config;
/// Error type shared by every stage
pub mod error;
/// Symbology-name lookup for format filters
pub mod hints;
/// Encoded image bytes to pixel grids
pub mod image_decoder;
/// Core data structures (PixelGrid, LuminanceMap, BitMatrix, formats)
pub mod models;
/// Rotation search driving the decode primitive
pub mod pipeline;
/// Symbol-decoding primitives
pub mod reader;
/// Request and option types handed over by a host bridge
pub mod request;
/// Helpers for the command line tool
pub mod tools;
/// Image processing stages (luminance, binarization, rotation)
pub mod utils;
/// Background decoding on a worker pool
pub mod worker;

pub use config::RecognizerConfig;
pub use error::{RecognizeError, Result};
pub use models::{
    BarcodeFormat, BitMatrix, DecodeOutcome, FormatFilter, LuminanceMap, PixelGrid, Symbol,
};
pub use pipeline::{DecodeOrchestrator, DecodeTelemetry};
pub use reader::{MultiFormatReader, QrReader, ReadAttempt, SymbolReader};
pub use request::{DecodeOptions, DecodeRequest};
pub use utils::rotation::Rotation;
pub use worker::{PendingDecode, RecognitionWorker};

use std::sync::LazyLock;

static DEFAULT_ORCHESTRATOR: LazyLock<DecodeOrchestrator> =
    LazyLock::new(DecodeOrchestrator::default);

/// Decode a request with the default configuration and built-in readers
pub fn decode(request: &DecodeRequest) -> Result<DecodeOutcome> {
    DEFAULT_ORCHESTRATOR.decode(request)
}

/// Decode a base64 image payload.
///
/// Returns the symbol text, or an empty string when the image holds no
/// readable symbol. Transport and image failures are errors.
pub fn decode_base64(data: &str, options: DecodeOptions) -> Result<String> {
    let request = DecodeRequest::from_base64(data, options)?;
    decode(&request).map(DecodeOutcome::into_text)
}

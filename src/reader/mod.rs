//! Symbol-decoding primitives.
//!
//! A [`SymbolReader`] turns one binarized image into at most one symbol. The
//! pipeline never looks inside a reader; it only inspects the
//! [`ReadAttempt`] it returns. [`MultiFormatReader`] fans one bitmap out to
//! every registered reader the request's [`FormatFilter`] allows.

/// QR Code backend
pub mod qr;

use crate::models::{BarcodeFormat, BitMatrix, FormatFilter};

pub use qr::QrReader;

/// Result of running a reader over one bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadAttempt {
    /// Symbol decoded
    Found {
        /// Decoded text
        text: String,
        /// Symbology that produced it
        format: BarcodeFormat,
    },
    /// Nothing resembling a symbol in this bitmap
    NotFound,
    /// A candidate symbol was located but could not be decoded
    Rejected {
        /// Symbology of the rejected candidate
        format: BarcodeFormat,
        /// Why decoding failed (checksum, format information, ...)
        reason: String,
    },
}

/// A decoding primitive for one symbology
pub trait SymbolReader: Send + Sync {
    /// Symbology this reader recognizes
    fn format(&self) -> BarcodeFormat;

    /// Try to read a symbol from a binarized image
    fn read(&self, bitmap: &BitMatrix) -> ReadAttempt;
}

/// Dispatches to every registered reader allowed by a filter
pub struct MultiFormatReader {
    readers: Vec<Box<dyn SymbolReader>>,
}

impl MultiFormatReader {
    /// Reader set with no backends registered
    pub fn empty() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Register an additional backend; earlier registrations run first
    pub fn with_reader(mut self, reader: impl SymbolReader + 'static) -> Self {
        self.readers.push(Box::new(reader));
        self
    }

    /// Symbologies with a registered backend
    pub fn supported_formats(&self) -> Vec<BarcodeFormat> {
        self.readers.iter().map(|r| r.format()).collect()
    }

    /// Run each permitted reader in registration order.
    ///
    /// The first non-empty `Found` wins. If nothing is found, the last
    /// rejection (if any) is reported so callers can log it.
    pub fn decode(&self, bitmap: &BitMatrix, filter: &FormatFilter) -> ReadAttempt {
        let mut outcome = ReadAttempt::NotFound;
        for reader in self.readers.iter().filter(|r| filter.allows(r.format())) {
            match reader.read(bitmap) {
                ReadAttempt::Found { text, format } if !text.is_empty() => {
                    return ReadAttempt::Found { text, format };
                }
                ReadAttempt::Found { format, .. } => {
                    log::debug!("{} reader returned empty text", format);
                }
                rejected @ ReadAttempt::Rejected { .. } => outcome = rejected,
                ReadAttempt::NotFound => {}
            }
        }
        outcome
    }
}

impl Default for MultiFormatReader {
    /// All built-in backends
    fn default() -> Self {
        Self::empty().with_reader(QrReader::new())
    }
}

use super::BarcodeFormat;
use crate::utils::rotation::Rotation;

/// A recognized barcode symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Decoded text content
    pub text: String,
    /// Symbology that produced the text
    pub format: BarcodeFormat,
    /// Rotation applied to the source image when the symbol was read
    pub rotation: Rotation,
}

/// Final result of one decode request.
///
/// Failures to process the image are reported separately as errors, so
/// `NotFound` always means "the image was read, but held no symbol".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A symbol was recognized
    Found(Symbol),
    /// No symbol at any of the attempted orientations
    NotFound,
}

impl DecodeOutcome {
    /// The recognized symbol, if any
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            DecodeOutcome::Found(symbol) => Some(symbol),
            DecodeOutcome::NotFound => None,
        }
    }

    /// True when a symbol was recognized
    pub fn is_found(&self) -> bool {
        matches!(self, DecodeOutcome::Found(_))
    }

    /// Text contract of the host bridge: decoded text, or `""` when nothing was found
    pub fn into_text(self) -> String {
        match self {
            DecodeOutcome::Found(symbol) => symbol.text,
            DecodeOutcome::NotFound => String::new(),
        }
    }
}

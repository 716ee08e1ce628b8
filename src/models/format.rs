use std::collections::BTreeSet;
use std::fmt;

/// Barcode symbologies known to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BarcodeFormat {
    /// Aztec 2D
    Aztec,
    /// Codabar 1D
    Codabar,
    /// Code 39 1D
    Code39,
    /// Code 93 1D
    Code93,
    /// Code 128 1D
    Code128,
    /// Data Matrix 2D
    DataMatrix,
    /// EAN-8 1D
    Ean8,
    /// EAN-13 1D
    Ean13,
    /// Interleaved 2 of 5
    Itf,
    /// MaxiCode 2D
    MaxiCode,
    /// PDF417 stacked
    Pdf417,
    /// QR Code 2D
    QrCode,
    /// GS1 DataBar (RSS-14)
    Rss14,
    /// GS1 DataBar Expanded
    RssExpanded,
    /// UPC-A 1D
    UpcA,
    /// UPC-E 1D
    UpcE,
    /// UPC/EAN 2- or 5-digit extension
    UpcEanExtension,
}

impl BarcodeFormat {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeFormat::Aztec => "AZTEC",
            BarcodeFormat::Codabar => "CODABAR",
            BarcodeFormat::Code39 => "CODE_39",
            BarcodeFormat::Code93 => "CODE_93",
            BarcodeFormat::Code128 => "CODE_128",
            BarcodeFormat::DataMatrix => "DATA_MATRIX",
            BarcodeFormat::Ean8 => "EAN_8",
            BarcodeFormat::Ean13 => "EAN_13",
            BarcodeFormat::Itf => "ITF",
            BarcodeFormat::MaxiCode => "MAXICODE",
            BarcodeFormat::Pdf417 => "PDF_417",
            BarcodeFormat::QrCode => "QR_CODE",
            BarcodeFormat::Rss14 => "RSS_14",
            BarcodeFormat::RssExpanded => "RSS_EXPANDED",
            BarcodeFormat::UpcA => "UPC_A",
            BarcodeFormat::UpcE => "UPC_E",
            BarcodeFormat::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of symbologies a decode attempt may report.
///
/// An empty filter places no restriction: every available reader runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatFilter {
    formats: BTreeSet<BarcodeFormat>,
}

impl FormatFilter {
    /// Filter that allows every format
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// True when no restriction applies
    pub fn is_unrestricted(&self) -> bool {
        self.formats.is_empty()
    }

    /// Whether readers for `format` should run
    pub fn allows(&self, format: BarcodeFormat) -> bool {
        self.formats.is_empty() || self.formats.contains(&format)
    }

    /// The explicitly requested formats, in stable order
    pub fn formats(&self) -> impl Iterator<Item = BarcodeFormat> + '_ {
        self.formats.iter().copied()
    }
}

impl FromIterator<BarcodeFormat> for FormatFilter {
    fn from_iter<I: IntoIterator<Item = BarcodeFormat>>(iter: I) -> Self {
        Self {
            formats: iter.into_iter().collect(),
        }
    }
}

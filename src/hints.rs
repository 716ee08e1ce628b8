//! Caller symbology names to [`FormatFilter`]s.

use crate::models::{BarcodeFormat, FormatFilter};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Public symbology names accepted in decode options
static FORMAT_NAMES: LazyLock<HashMap<&'static str, BarcodeFormat>> = LazyLock::new(|| {
    HashMap::from([
        ("aztec", BarcodeFormat::Aztec),
        ("ean13", BarcodeFormat::Ean13),
        ("ean8", BarcodeFormat::Ean8),
        ("qr", BarcodeFormat::QrCode),
        ("pdf417", BarcodeFormat::Pdf417),
        ("upc_e", BarcodeFormat::UpcE),
        ("datamatrix", BarcodeFormat::DataMatrix),
        ("code39", BarcodeFormat::Code39),
        ("code93", BarcodeFormat::Code93),
        ("interleaved2of5", BarcodeFormat::Itf),
        ("codabar", BarcodeFormat::Codabar),
        ("code128", BarcodeFormat::Code128),
        ("maxicode", BarcodeFormat::MaxiCode),
        ("rss14", BarcodeFormat::Rss14),
        ("rssexpanded", BarcodeFormat::RssExpanded),
        ("upc_a", BarcodeFormat::UpcA),
        ("upc_ean", BarcodeFormat::UpcEanExtension),
    ])
});

/// Look up a single public symbology name
pub fn format_for_name(name: &str) -> Option<BarcodeFormat> {
    FORMAT_NAMES.get(name).copied()
}

/// All accepted symbology names, sorted
pub fn known_names() -> Vec<&'static str> {
    let mut names: Vec<_> = FORMAT_NAMES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Build a format filter from caller tokens.
///
/// Unknown tokens are skipped. No tokens, or only unknown ones, produce an
/// unrestricted filter. Order and duplicates do not matter.
pub fn resolve<S: AsRef<str>>(tokens: &[S]) -> FormatFilter {
    tokens
        .iter()
        .filter_map(|token| {
            let token = token.as_ref();
            let format = format_for_name(token);
            if format.is_none() {
                log::debug!("ignoring unknown symbology {:?}", token);
            }
            format
        })
        .collect()
}

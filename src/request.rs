//! Decode requests as they arrive from a host bridge.
//!
//! The bridge hands over a base64 string plus an option map. Only the
//! `codeTypes` key is understood; any other key is ignored.

use crate::error::Result;
use crate::hints;
use crate::models::FormatFilter;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Caller options for one decode request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Symbology names to restrict decoding to (see [`hints::known_names`])
    #[serde(rename = "codeTypes", default, skip_serializing_if = "Option::is_none")]
    pub code_types: Option<Vec<String>>,
}

impl DecodeOptions {
    /// Options restricted to the given symbology names
    pub fn with_code_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code_types: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Parse an option map from JSON, ignoring unknown keys
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Format filter implied by these options
    pub fn format_filter(&self) -> FormatFilter {
        match &self.code_types {
            Some(names) => hints::resolve(names.as_slice()),
            None => FormatFilter::unrestricted(),
        }
    }
}

/// Encoded image bytes plus options, consumed by a single decode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    /// Encoded still image (PNG, JPEG, ...)
    pub image: Vec<u8>,
    /// Caller options
    pub options: DecodeOptions,
}

impl DecodeRequest {
    /// Request from raw encoded bytes
    pub fn new(image: Vec<u8>, options: DecodeOptions) -> Self {
        Self { image, options }
    }

    /// Request from a base64 payload.
    ///
    /// Line breaks and other ASCII whitespace inside the payload are
    /// skipped, as MIME-style encoders insert them.
    pub fn from_base64(data: &str, options: DecodeOptions) -> Result<Self> {
        Ok(Self::new(decode_base64(data)?, options))
    }
}

/// Decode standard-alphabet base64, skipping embedded whitespace
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

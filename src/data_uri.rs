//! Inline base64 data URI parsing and construction.
//!
//! Generated images travel through the studio as `data:<mime>;base64,<bytes>`
//! strings, the same form the Gemini response parts are normalized into.

use crate::{Error, Result};
use base64::Engine as _;

/// A decoded `data:` URI payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Parse a `data:<mime>;base64,<payload>` string.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| Error::DataUri("Missing 'data:' prefix".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::DataUri("Missing ',' separator".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| Error::DataUri("Only base64 data URIs are supported".to_string()))?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::DataUri(format!("Invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }

    /// Build a `data:<mime>;base64,<payload>` string from raw bytes.
    pub fn encode(mime_type: &str, data: &[u8]) -> String {
        format!(
            "data:{};base64,{}",
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(data)
        )
    }
}

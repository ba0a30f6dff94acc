//! Transport decoding for provider audio payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

/// Decodes a standard (RFC 4648, padded) base64 string into raw bytes.
///
/// ASCII whitespace is ignored, so payloads wrapped across lines decode the
/// same as single-line ones.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        return Ok(STANDARD.decode(cleaned)?);
    }
    Ok(STANDARD.decode(text)?)
}

/// Encodes raw bytes as standard base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

// src/github/decode.rs
// =============================================================================
// Turns a FileDescriptor into plain text.
//
// GitHub sends file bodies base64-encoded and wrapped at 60 columns, so the
// line breaks have to go before decoding. Anything not tagged "base64" is
// passed through as-is.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::contents::FileDescriptor;
use super::error::ExtractError;

pub fn decode(file: &FileDescriptor) -> Result<String, ExtractError> {
    let content = file.content.as_deref().unwrap_or("");

    if file.encoding.as_deref() != Some("base64") {
        return Ok(content.to_string());
    }

    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = STANDARD.decode(compact).map_err(|e| ExtractError::Decode {
        path: file.path.clone(),
        reason: format!("invalid base64: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| ExtractError::Decode {
        path: file.path.clone(),
        reason: format!("not UTF-8 text: {}", e),
    })
}

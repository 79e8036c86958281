use crate::TOKEN_WIDTH;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use snip_core::error::{CoreError, Result};
use snip_core::{Encoder, ShortCode};

/// Encodes a URL as standard base64 and keeps the last [`TOKEN_WIDTH`] characters.
///
/// URLs that share a long enough suffix share a token: `…/a.com` and
/// `…/b.com` differ only in bytes that end up outside the tail. Inputs whose
/// encoding is shorter than the width keep their whole encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64TailEncoder;

impl Encoder for Base64TailEncoder {
    fn encode(&self, url: &str) -> Result<ShortCode> {
        if url.is_empty() {
            return Err(CoreError::EmptyInput("url"));
        }

        let encoded = STANDARD.encode(url.as_bytes());
        let start = encoded.len().saturating_sub(TOKEN_WIDTH);
        // base64 output is ASCII, so any byte offset is a char boundary
        Ok(ShortCode::new_unchecked(&encoded[start..]))
    }
}

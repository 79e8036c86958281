use crate::TOKEN_WIDTH;
use snip_core::error::{CoreError, Result};
use snip_core::{Encoder, ShortCode};
use typed_builder::TypedBuilder;
use xxhash_rust::xxh64::xxh64;

/// Hashes a URL with xxh64 and keeps the last [`TOKEN_WIDTH`] base58 digits.
///
/// Unlike [`Base64TailEncoder`](crate::Base64TailEncoder), every byte of the
/// URL influences the token, so URLs sharing a suffix no longer share a code.
/// Collisions remain possible (58^6 slots).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct DigestEncoder {
    #[builder(default = 0)]
    seed: u64,
}

impl DigestEncoder {
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Encoder for DigestEncoder {
    fn encode(&self, url: &str) -> Result<ShortCode> {
        if url.is_empty() {
            return Err(CoreError::EmptyInput("url"));
        }

        let hash = xxh64(url.as_bytes(), self.seed);
        // 8 bytes always encode to at least 8 base58 digits
        let encoded = bs58::encode(hash.to_be_bytes()).into_string();
        let start = encoded.len().saturating_sub(TOKEN_WIDTH);
        Ok(ShortCode::new_unchecked(&encoded[start..]))
    }
}

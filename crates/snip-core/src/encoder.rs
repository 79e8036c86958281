use crate::error::Result;
use crate::shortcode::ShortCode;

/// Derives a short code from a URL.
///
/// Implementations are pure functions of their input: the same URL must
/// always produce the same code, and they never touch storage. Encoders are
/// not required to be collision-free; the shortener decides what happens when
/// two URLs share a code.
pub trait Encoder: Send + Sync + 'static {
    /// Encodes `url` into a short code. Empty input is rejected with
    /// [`CoreError::EmptyInput`](crate::CoreError::EmptyInput).
    fn encode(&self, url: &str) -> Result<ShortCode>;
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&self, url: &str) -> Result<ShortCode> {
        (**self).encode(url)
    }
}

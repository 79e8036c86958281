use crate::error::ShortenerError;
use crate::record::Durability;
use crate::shortcode::ShortCode;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Outcome of a successful [`Shortener::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    /// The short code the URL is reachable under.
    pub code: ShortCode,
    /// `true` if this call created the record, `false` if it already existed.
    pub created: bool,
    /// Whether the record is backed by the durable log.
    pub durability: Durability,
}

/// The read/write contract the outer layers use.
///
/// Operations are synchronous: `shorten` may perform bounded local I/O while
/// holding the writer lock, `resolve` never does.
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `original_url`, returning the existing code on repeat submissions.
    fn shorten(&self, original_url: &str) -> Result<Shortened>;

    /// Resolves a short code to the original URL.
    /// Returns `None` if the code is unknown.
    fn resolve(&self, code: &str) -> Result<Option<String>>;

    /// Number of records currently served.
    fn records(&self) -> usize;
}

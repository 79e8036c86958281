use std::sync::Arc;

use snip_core::Shortener;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: Arc::from(public_base_url.into()),
        }
    }

    pub fn shortener(&self) -> Arc<dyn Shortener> {
        Arc::clone(&self.shortener)
    }

    /// Prefix of the short URLs handed back to clients.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

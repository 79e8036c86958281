//! URL shortener service implementation.
//!
//! [`ShortenerService`] composes the in-memory index, the durable log and an
//! encoder behind the [`Shortener`](snip_core::Shortener) contract. Core
//! types are re-exported from `snip_core`.

pub mod service;
pub mod settings;

pub use service::{RestoreReport, ShortenerService};
pub use settings::{CollisionPolicy, DurabilityPolicy, ServiceSettings, DEFAULT_MAX_PROBES};
pub use snip_core::{Shortened, Shortener, ShortenerError};

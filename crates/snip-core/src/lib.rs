//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the vocabulary shared by the encoder, storage,
//! shortener and gateway crates.

pub mod encoder;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod shortener;

pub use encoder::Encoder;
pub use error::{CoreError, ShortenerError};
pub use record::{Durability, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{Shortened, Shortener};

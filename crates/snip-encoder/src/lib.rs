//! Short code encoders.
//!
//! Every encoder here implements [`snip_core::Encoder`] and produces tokens
//! of at most [`TOKEN_WIDTH`] characters. None of them is collision-free.

pub mod base64_tail;
pub mod digest;

pub use base64_tail::Base64TailEncoder;
pub use digest::DigestEncoder;

/// Width of the tokens produced by the encoders in this crate.
pub const TOKEN_WIDTH: usize = 6;

//! HTTP gateway for the snip URL shortener.
//!
//! The gateway is a thin layer: it parses requests, calls the
//! [`Shortener`](snip_core::Shortener) held in [`AppState`] and formats the
//! answer. Configuration comes from flags and environment variables.

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use cli::Cli;
pub use state::AppState;

//! In-memory index and append-only durable log backing the shortener.

pub mod error;
pub mod index;
pub mod log;

pub use error::{Result, StorageError};
pub use index::{IndexEntry, MemoryIndex};
pub use log::file::{FileLog, FileLogOptions};
pub use log::memory::MemoryLog;
pub use log::{RecordLog, Replay};

pub mod file;
pub mod memory;

use crate::error::Result;
use snip_core::UrlRecord;

/// Everything recovered from a log, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replay {
    /// Records that decoded successfully.
    pub records: Vec<UrlRecord>,
    /// Complete entries that failed to decode and were skipped.
    pub skipped: usize,
    /// Bytes of an incomplete trailing entry that were discarded.
    pub truncated_bytes: u64,
}

/// An append-only record store.
///
/// Entries are never rewritten or compacted. Methods take `&mut self`: the
/// log is a single shared resource and its owner is expected to serialize
/// access so entries never interleave.
pub trait RecordLog: Send + 'static {
    /// Appends one record. On `Ok` the entry has been handed to stable
    /// storage (subject to the implementation's sync options).
    fn append(&mut self, record: &UrlRecord) -> Result<()>;

    /// Reads back every entry appended so far.
    ///
    /// Malformed entries are skipped rather than failing the whole replay.
    fn replay(&mut self) -> Result<Replay>;
}

impl<L: RecordLog + ?Sized> RecordLog for Box<L> {
    fn append(&mut self, record: &UrlRecord) -> Result<()> {
        (**self).append(record)
    }

    fn replay(&mut self) -> Result<Replay> {
        (**self).replay()
    }
}

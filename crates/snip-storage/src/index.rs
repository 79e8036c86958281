use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::{Durability, ShortCode, UrlRecord};
use std::sync::atomic::{AtomicU64, Ordering};

/// A record as held by the index, together with its durability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub record: UrlRecord,
    pub durability: Durability,
}

/// In-memory token → record map.
///
/// DashMap shards its locks, so lookups only contend with writes to the same
/// bucket. The index has no notion of persistence and does not coordinate
/// check-then-insert sequences across calls; callers that need that must
/// serialize their writers.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    entries: DashMap<ShortCode, IndexEntry>,
    last_id: AtomicU64,
}

impl MemoryIndex {
    /// Creates an empty index. The first id handed out is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its code if the code is absent.
    ///
    /// Returns `false` when the code is already taken. The existing record is
    /// left untouched and may belong to a different URL.
    pub fn put(&self, record: UrlRecord, durability: Durability) -> bool {
        match self.entries.entry(record.code.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                self.observe_id(record.id);
                slot.insert(IndexEntry { record, durability });
                true
            }
        }
    }

    /// Looks up the entry stored under `code`.
    pub fn get(&self, code: &str) -> Option<IndexEntry> {
        self.entries.get(code).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Returns a fresh id, strictly greater than every id handed out or observed so far.
    pub fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Raises the id counter to at least `id`.
    pub fn observe_id(&self, id: u64) {
        self.last_id.fetch_max(id, Ordering::SeqCst);
    }

    /// The largest id handed out or observed, 0 if none.
    pub fn last_id(&self) -> u64 {
        self.last_id.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use crate::error::{Result, StorageError};
use crate::log::{RecordLog, Replay};
use parking_lot::Mutex;
use snip_core::UrlRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Shared {
    records: Mutex<Vec<UrlRecord>>,
    closed: AtomicBool,
}

/// A log kept in process memory.
///
/// Clones share the same entries, so a clone kept aside can inspect what
/// the owner appended or be replayed into a fresh shortener to simulate a
/// restart. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    shared: Arc<Shared>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every appended record, in write order.
    pub fn records(&self) -> Vec<UrlRecord> {
        self.shared.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.shared.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.records.lock().is_empty()
    }

    /// Closes the log for every clone; later appends fail with [`StorageError::Closed`].
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}

impl RecordLog for MemoryLog {
    fn append(&mut self, record: &UrlRecord) -> Result<()> {
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(StorageError::Closed);
        }
        self.shared.records.lock().push(record.clone());
        Ok(())
    }

    fn replay(&mut self) -> Result<Replay> {
        Ok(Replay {
            records: self.records(),
            ..Replay::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::ShortCode;

    fn record(id: u64, url: &str) -> UrlRecord {
        UrlRecord {
            id,
            code: ShortCode::new_unchecked(format!("code-{id}")),
            original_url: url.to_string(),
        }
    }

    #[test]
    fn clones_share_entries() {
        let log = MemoryLog::new();
        let mut writer = log.clone();

        writer.append(&record(1, "https://example.com")).unwrap();
        writer.append(&record(2, "https://example.org")).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[1].original_url, "https://example.org");
    }

    #[test]
    fn replay_returns_records_in_order() {
        let mut log = MemoryLog::new();
        log.append(&record(1, "https://example.com")).unwrap();
        log.append(&record(2, "https://example.org")).unwrap();

        let replay = log.replay().unwrap();
        let ids: Vec<u64> = replay.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn closed_log_rejects_appends() {
        let mut log = MemoryLog::new();
        log.close();

        let err = log.append(&record(1, "https://example.com")).unwrap_err();
        assert!(matches!(err, StorageError::Closed));
        assert!(log.is_empty());
    }
}

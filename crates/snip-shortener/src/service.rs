use crate::settings::{CollisionPolicy, DurabilityPolicy, ServiceSettings};
use parking_lot::Mutex;
use snip_core::{Durability, Encoder, ShortCode, Shortened, Shortener, ShortenerError, UrlRecord};
use snip_storage::{IndexEntry, MemoryIndex, RecordLog};
use std::iter;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, ShortenerError>;

/// Summary of a [`ShortenerService::restore`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Records loaded into the index.
    pub restored: usize,
    /// Malformed log entries that were skipped.
    pub skipped: usize,
    /// Log entries whose code was already loaded; the first one wins.
    pub duplicates: usize,
    /// Bytes of an incomplete trailing entry discarded from the log.
    pub truncated_bytes: u64,
}


enum Probe {
    /// The code to store a new record under.
    Free(ShortCode),
    /// A record that answers the request without writing.
    Taken(IndexEntry),
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// The service exclusively owns the index and the durable log:
/// - reads go straight to the index and never wait for writers
/// - the check-insert-append sequence of `shorten` runs under a single
///   writer lock, which also serializes log appends
/// - both refuse to run until [`restore`](Self::restore) has loaded the log
///
/// The log handle is released when the service is dropped.
pub struct ShortenerService<L, E> {
    index: MemoryIndex,
    log: Mutex<L>,
    restored: AtomicBool,
    encoder: E,
    settings: ServiceSettings,
}

impl<L: RecordLog, E: Encoder> ShortenerService<L, E> {
    /// Creates a service with the default settings.
    pub fn new(log: L, encoder: E) -> Self {
        Self::with_settings(log, encoder, ServiceSettings::default())
    }

    pub fn with_settings(log: L, encoder: E, settings: ServiceSettings) -> Self {
        Self {
            index: MemoryIndex::new(),
            log: Mutex::new(log),
            restored: AtomicBool::new(false),
            encoder,
            settings,
        }
    }

    /// Rebuilds the index from the durable log.
    ///
    /// Must run once, before the service handles any request. Fails with
    /// `AlreadyRestored` on a second call.
    pub fn restore(&self) -> Result<RestoreReport> {
        let mut log = self.log.lock();
        if self.is_restored() {
            return Err(ShortenerError::AlreadyRestored);
        }

        let replay = log
            .replay()
            .map_err(|e| ShortenerError::Storage(e.to_string()))?;

        let mut report = RestoreReport {
            skipped: replay.skipped,
            truncated_bytes: replay.truncated_bytes,
            ..RestoreReport::default()
        };

        for record in replay.records {
            let id = record.id;
            let code = record.code.clone();
            if self.index.put(record, Durability::Persisted) {
                report.restored += 1;
            } else {
                self.index.observe_id(id);
                warn!(code = %code, id, "duplicate code in durable log, keeping the first entry");
                report.duplicates += 1;
            }
        }

        self.restored.store(true, Ordering::Release);

        info!(
            restored = report.restored,
            skipped = report.skipped,
            duplicates = report.duplicates,
            truncated_bytes = report.truncated_bytes,
            last_id = self.index.last_id(),
            "restored index from durable log"
        );

        Ok(report)
    }

    /// Shortens `original_url`.
    ///
    /// Repeat submissions return the existing code without touching the log.
    pub fn shorten(&self, original_url: &str) -> Result<Shortened> {
        if original_url.is_empty() {
            return Err(ShortenerError::EmptyInput("url"));
        }

        if !self.is_restored() {
            return Err(ShortenerError::NotRestored);
        }

        let base = self.encoder.encode(original_url)?;

        // Lock-free fast path. The store only grows, so a hit stays valid.
        if let Probe::Taken(entry) = self.probe(&base, original_url)? {
            return Ok(Self::existing(entry, original_url));
        }

        let mut log = self.log.lock();

        // Re-check under the lock: another writer may have taken the slot.
        let code = match self.probe(&base, original_url)? {
            Probe::Taken(entry) => return Ok(Self::existing(entry, original_url)),
            Probe::Free(code) => code,
        };

        let record = UrlRecord {
            id: self.index.next_id(),
            code,
            original_url: original_url.to_owned(),
        };

        let durability = match log.append(&record) {
            Ok(()) => Durability::Persisted,
            Err(err) => match self.settings.durability {
                DurabilityPolicy::BestEffort => {
                    warn!(
                        code = %record.code,
                        id = record.id,
                        error = %err,
                        "durable log append failed, record will not survive a restart"
                    );
                    Durability::Volatile
                }
                DurabilityPolicy::Strict => {
                    warn!(
                        code = %record.code,
                        id = record.id,
                        error = %err,
                        "durable log append failed, rejecting record"
                    );
                    return Err(ShortenerError::Persistence {
                        code: record.code.to_string(),
                        reason: err.to_string(),
                    });
                }
            },
        };

        let id = record.id;
        let code = record.code.clone();
        // Only writers insert and we hold the writer lock, so the slot is still free.
        let inserted = self.index.put(record, durability);
        debug_assert!(inserted, "free slot taken while holding the writer lock");

        debug!(code = %code, id, ?durability, "shortened url");

        Ok(Shortened {
            code,
            created: true,
            durability,
        })
    }

    /// Resolves `code` to its original URL. Never waits for writers.
    pub fn resolve(&self, code: &str) -> Result<Option<String>> {
        if code.is_empty() {
            return Err(ShortenerError::EmptyInput("short code"));
        }
        if !self.is_restored() {
            return Err(ShortenerError::NotRestored);
        }
        Ok(self.index.get(code).map(|entry| entry.record.original_url))
    }

    /// Returns the full index entry stored under `code`.
    pub fn entry(&self, code: &str) -> Option<IndexEntry> {
        self.index.get(code)
    }

    /// Number of records in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn is_restored(&self) -> bool {
        self.restored.load(Ordering::Acquire)
    }

    fn probe(&self, base: &ShortCode, original_url: &str) -> Result<Probe> {
        let max_probes = match self.settings.collision {
            CollisionPolicy::Accept => {
                return Ok(match self.index.get(base.as_str()) {
                    Some(entry) => Probe::Taken(entry),
                    None => Probe::Free(base.clone()),
                });
            }
            CollisionPolicy::Disambiguate { max_probes } => max_probes,
        };

        let candidates =
            iter::once(base.clone()).chain((1..=max_probes).map(|n| base.with_suffix(n)));
        for candidate in candidates {
            match self.index.get(candidate.as_str()) {
                None => return Ok(Probe::Free(candidate)),
                Some(entry) if entry.record.original_url == original_url => {
                    return Ok(Probe::Taken(entry))
                }
                Some(_) => continue,
            }
        }

        Err(ShortenerError::CollisionExhausted {
            url: original_url.to_owned(),
            probes: max_probes,
        })
    }

    fn existing(entry: IndexEntry, original_url: &str) -> Shortened {
        if entry.record.original_url != original_url {
            debug!(
                code = %entry.record.code,
                stored_url = %entry.record.original_url,
                "code already maps to a different url, returning it unchanged"
            );
        }

        Shortened {
            code: entry.record.code,
            created: false,
            durability: entry.durability,
        }
    }
}

impl<L: RecordLog, E: Encoder> Shortener for ShortenerService<L, E> {
    fn shorten(&self, original_url: &str) -> Result<Shortened> {
        ShortenerService::shorten(self, original_url)
    }

    fn resolve(&self, code: &str) -> Result<Option<String>> {
        ShortenerService::resolve(self, code)
    }

    fn records(&self) -> usize {
        self.len()
    }
}

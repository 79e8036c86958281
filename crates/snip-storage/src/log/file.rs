use crate::error::{Result, StorageError};
use crate::log::{RecordLog, Replay};
use snip_core::UrlRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Options for a [`FileLog`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct FileLogOptions {
    /// `fsync` the file after every append. Without it an append is only
    /// flushed to the operating system.
    #[builder(default = true)]
    pub fsync: bool,
}

impl Default for FileLogOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A durable log stored as one JSON record per line.
///
/// ```text
/// {"uuid":1,"short_url":"lhLnJ1","original_url":"http://ya.ru"}
/// {"uuid":2,"short_url":"NvbQ==","original_url":"https://example.com"}
/// ```
///
/// A line is only complete once its `\n` is on disk. [`replay`](RecordLog::replay)
/// cuts an unterminated last line off the file so the next append starts on
/// a fresh line.
///
/// A failed append is cut back to the previous end of the log. If that cut
/// fails too, or the file already ended in a partial line when it was
/// opened, appends are refused with [`StorageError::NeedsRepair`] until the
/// next replay.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    file: File,
    options: FileLogOptions,
    /// End of the last complete entry.
    len: u64,
    needs_repair: bool,
}

impl FileLog {
    /// Opens the log at `path`, creating the file and its parent directories
    /// if they don't exist.
    pub fn open(path: impl AsRef<Path>, options: FileLogOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let len = file.metadata()?.len();
        let needs_repair = len > 0 && !ends_with_newline(&file)?;

        debug!(
            path = %path.display(),
            fsync = options.fsync,
            len,
            needs_repair,
            "opened durable log"
        );

        Ok(Self {
            path,
            file,
            options,
            len,
            needs_repair,
        })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sync(&self) -> Result<()> {
        if self.options.fsync {
            self.file.sync_data()?;
        }
        Ok(())
    }

    fn write_entry(&mut self, line: &[u8]) -> Result<()> {
        // a single write_all keeps the entry contiguous under O_APPEND
        self.file.write_all(line)?;
        self.file.flush()?;
        self.sync()
    }

    /// Drops whatever a failed append left past the last complete entry.
    fn rollback(&mut self) {
        let result = self
            .file
            .set_len(self.len)
            .map_err(StorageError::from)
            .and_then(|()| self.sync());

        if let Err(err) = result {
            warn!(
                path = %self.path.display(),
                len = self.len,
                error = %err,
                "failed to cut back a partial append, refusing appends until the next replay"
            );
            self.needs_repair = true;
        }
    }
}

fn ends_with_newline(mut file: &File) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl RecordLog for FileLog {
    fn append(&mut self, record: &UrlRecord) -> Result<()> {
        if self.needs_repair {
            return Err(StorageError::NeedsRepair);
        }

        let mut line =
            serde_json::to_vec(record).map_err(|e| StorageError::Serialization(e.to_string()))?;
        line.push(b'\n');

        if let Err(err) = self.write_entry(&line) {
            self.rollback();
            return Err(err);
        }

        self.len += line.len() as u64;
        Ok(())
    }

    fn replay(&mut self) -> Result<Replay> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut replay = Replay::default();
        let mut buf = Vec::new();
        let mut offset = 0u64;
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf)?;
            if read == 0 {
                break;
            }

            if buf.last() != Some(&b'\n') {
                warn!(
                    path = %self.path.display(),
                    offset,
                    bytes = read,
                    "discarding incomplete trailing log entry"
                );
                self.file.set_len(offset)?;
                self.sync()?;
                replay.truncated_bytes = read as u64;
                break;
            }

            offset += read as u64;
            line_no += 1;

            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_slice::<UrlRecord>(line) {
                Ok(record) => replay.records.push(record),
                Err(e) => {
                    let err = StorageError::Decode {
                        line: line_no,
                        reason: e.to_string(),
                    };
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "skipping malformed log entry"
                    );
                    replay.skipped += 1;
                }
            }
        }

        self.len = offset;
        self.needs_repair = false;

        debug!(
            path = %self.path.display(),
            records = replay.records.len(),
            skipped = replay.skipped,
            truncated_bytes = replay.truncated_bytes,
            "replayed durable log"
        );

        Ok(replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::ShortCode;

    fn record(id: u64, code: &str, url: &str) -> UrlRecord {
        UrlRecord {
            id,
            code: ShortCode::new_unchecked(code),
            original_url: url.to_string(),
        }
    }

    #[test]
    fn append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let mut log = FileLog::open(&path, FileLogOptions::default()).unwrap();

        log.append(&record(1, "lhLnJ1", "http://ya.ru")).unwrap();
        log.append(&record(2, "NvbQ==", "https://example.com")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            concat!(
                "{\"uuid\":1,\"short_url\":\"lhLnJ1\",\"original_url\":\"http://ya.ru\"}\n",
                "{\"uuid\":2,\"short_url\":\"NvbQ==\",\"original_url\":\"https://example.com\"}\n",
            )
        );
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("urls.json");

        let log = FileLog::open(&path, FileLogOptions::default()).unwrap();

        assert!(path.exists());
        assert_eq!(log.path(), path.as_path());
    }

    #[test]
    fn replay_of_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let mut log = FileLog::open(&path, FileLogOptions::default()).unwrap();

        assert_eq!(log.replay().unwrap(), Replay::default());
    }

    #[test]
    fn replay_tolerates_crlf_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        fs::write(
            &path,
            "{\"uuid\":1,\"short_url\":\"lhLnJ1\",\"original_url\":\"http://ya.ru\"}\r\n\n",
        )
        .unwrap();

        let mut log = FileLog::open(&path, FileLogOptions::default()).unwrap();
        let replay = log.replay().unwrap();

        assert_eq!(replay.records, vec![record(1, "lhLnJ1", "http://ya.ru")]);
        assert_eq!(replay.skipped, 0);
    }

    const FRAGMENT: &[u8] = b"{\"uuid\":2,\"sho";

    #[test]
    fn failed_append_is_cut_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let mut log = FileLog::open(&path, FileLogOptions::default()).unwrap();
        log.append(&record(1, "lhLnJ1", "http://ya.ru")).unwrap();

        // a short write that died halfway through the second entry
        log.file.write_all(FRAGMENT).unwrap();
        log.rollback();
        log.append(&record(3, "bS9h", "https://example.com/a")).unwrap();

        let replay = FileLog::open(&path, FileLogOptions::default())
            .unwrap()
            .replay()
            .unwrap();
        assert_eq!(
            replay.records,
            vec![
                record(1, "lhLnJ1", "http://ya.ru"),
                record(3, "bS9h", "https://example.com/a"),
            ]
        );
        assert_eq!(replay.skipped, 0);
        assert_eq!(replay.truncated_bytes, 0);
    }

    #[test]
    fn unrepaired_log_refuses_appends_until_replayed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let mut log = FileLog::open(&path, FileLogOptions::default()).unwrap();
        log.append(&record(1, "lhLnJ1", "http://ya.ru")).unwrap();

        // the fragment could not be cut back
        log.file.write_all(FRAGMENT).unwrap();
        log.needs_repair = true;

        let err = log.append(&record(3, "bS9h", "https://example.com/a")).unwrap_err();
        assert!(matches!(err, StorageError::NeedsRepair));

        let replay = log.replay().unwrap();
        assert_eq!(replay.truncated_bytes, FRAGMENT.len() as u64);

        log.append(&record(3, "bS9h", "https://example.com/a")).unwrap();
        let replay = log.replay().unwrap();
        assert_eq!(replay.records.len(), 2);
        assert_eq!(replay.skipped, 0);
    }
}

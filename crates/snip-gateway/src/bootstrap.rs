use std::sync::Arc;

use anyhow::Context;
use snip_core::{Encoder, Shortener};
use snip_encoder::{Base64TailEncoder, DigestEncoder};
use snip_shortener::ShortenerService;
use snip_storage::{FileLog, FileLogOptions, MemoryLog, RecordLog};
use tracing::info;

use crate::cli::{Cli, EncoderArg, StorageBackendArg};

/// Builds the shortener described by `cli` and restores it from its log.
///
/// The returned shortener is ready to serve requests.
pub fn build_shortener(cli: &Cli) -> anyhow::Result<Arc<dyn Shortener>> {
    let log: Box<dyn RecordLog> = match cli.storage {
        StorageBackendArg::File => {
            let options = FileLogOptions::builder().fsync(!cli.no_fsync).build();
            let log = FileLog::open(&cli.file_storage_path, options).with_context(|| {
                format!(
                    "failed to open durable log at {}",
                    cli.file_storage_path.display()
                )
            })?;
            Box::new(log)
        }
        StorageBackendArg::InMemory => Box::new(MemoryLog::new()),
    };

    let encoder: Box<dyn Encoder> = match cli.encoder {
        EncoderArg::Base64Tail => Box::new(Base64TailEncoder),
        EncoderArg::Digest => Box::new(DigestEncoder::builder().build()),
    };

    let service = ShortenerService::with_settings(log, encoder, cli.service_settings());
    let report = service
        .restore()
        .context("failed to restore index from durable log")?;

    info!(
        storage = %cli.storage,
        encoder = %cli.encoder,
        collision = %cli.collision,
        durability = %cli.durability,
        records = report.restored,
        "shortener ready"
    );

    Ok(Arc::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("snip").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn file_backend_restores_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let path = path.to_str().unwrap();

        let code = build_shortener(&cli(&["-f", path]))
            .unwrap()
            .shorten("http://ya.ru")
            .unwrap()
            .code;

        let shortener = build_shortener(&cli(&["-f", path])).unwrap();
        assert_eq!(
            shortener.resolve(code.as_str()).unwrap().as_deref(),
            Some("http://ya.ru")
        );
    }

    #[test]
    fn in_memory_backend_starts_empty() {
        let shortener = build_shortener(&cli(&["--storage", "in-memory", "--encoder", "digest"]))
            .unwrap();

        let shortened = shortener.shorten("http://ya.ru").unwrap();
        assert!(shortened.created);
        assert_eq!(shortened.code.as_str().len(), 6);
    }
}

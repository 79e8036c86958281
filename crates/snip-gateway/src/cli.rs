use clap::{Parser, ValueEnum};
use snip_shortener::{CollisionPolicy, DurabilityPolicy, ServiceSettings};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SERVER_ADDRESS";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const FILE_STORAGE_PATH_ENV: &str = "FILE_STORAGE_PATH";
pub const STORAGE_BACKEND_ENV: &str = "SNIP_STORAGE_BACKEND";
pub const ENCODER_ENV: &str = "SNIP_ENCODER";
pub const COLLISION_POLICY_ENV: &str = "SNIP_COLLISION_POLICY";
pub const DURABILITY_ENV: &str = "SNIP_DURABILITY";
pub const NO_FSYNC_ENV: &str = "SNIP_NO_FSYNC";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "localhost:8080";
pub const DEFAULT_FILE_STORAGE_PATH: &str = "/tmp/short-url-db.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "file")]
    File,
    #[value(name = "in-memory")]
    InMemory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncoderArg {
    /// Last 6 characters of the standard base64 encoding of the URL.
    #[value(name = "base64-tail")]
    Base64Tail,
    /// Last 6 base58 digits of the xxh64 hash of the URL.
    #[value(name = "digest")]
    Digest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    #[value(name = "accept")]
    Accept,
    #[value(name = "disambiguate")]
    Disambiguate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DurabilityArg {
    #[value(name = "best-effort")]
    BestEffort,
    #[value(name = "strict")]
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

macro_rules! display_as_value_name {
    ($($arg:ty),+ $(,)?) => {
        $(
            impl Display for $arg {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    match self.to_possible_value() {
                        Some(value) => f.write_str(value.get_name()),
                        None => Ok(()),
                    }
                }
            }
        )+
    };
}

display_as_value_name!(StorageBackendArg, EncoderArg, CollisionArg, DurabilityArg, LogFormat);

#[derive(Debug, Parser)]
#[command(name = "snip", about = "URL shortener backed by an append-only log")]
pub struct Cli {
    /// Address and port to run the server on.
    #[arg(short = 'a', long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Prefix of the returned short URLs. Defaults to `http://<listen-addr>`.
    #[arg(short = 'b', long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Path of the durable log file.
    #[arg(
        short = 'f',
        long,
        env = FILE_STORAGE_PATH_ENV,
        default_value = DEFAULT_FILE_STORAGE_PATH
    )]
    pub file_storage_path: PathBuf,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::File
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = ENCODER_ENV, value_enum, default_value_t = EncoderArg::Base64Tail)]
    pub encoder: EncoderArg,

    #[arg(long, env = COLLISION_POLICY_ENV, value_enum, default_value_t = CollisionArg::Accept)]
    pub collision: CollisionArg,

    #[arg(
        long,
        env = DURABILITY_ENV,
        value_enum,
        default_value_t = DurabilityArg::BestEffort
    )]
    pub durability: DurabilityArg,

    /// Only flush appends to the OS instead of syncing them to disk.
    #[arg(long, env = NO_FSYNC_ENV)]
    pub no_fsync: bool,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.listen_addr))
    }

    pub fn service_settings(&self) -> ServiceSettings {
        let collision = match self.collision {
            CollisionArg::Accept => CollisionPolicy::Accept,
            CollisionArg::Disambiguate => CollisionPolicy::disambiguate(),
        };
        let durability = match self.durability {
            DurabilityArg::BestEffort => DurabilityPolicy::BestEffort,
            DurabilityArg::Strict => DurabilityPolicy::Strict,
        };

        ServiceSettings::builder()
            .collision(collision)
            .durability(durability)
            .build()
    }
}

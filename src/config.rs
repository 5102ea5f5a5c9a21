//! Configuration types for news-harvester
//!
//! Configuration is read from a JSON file (default `cfg.json`) and passed by
//! value into each component's constructor; there is no process-wide
//! configuration singleton. Every field has a default, so an empty JSON
//! object is a valid (if not very useful) configuration; the load URL is the
//! one field validated as non-empty at startup.
//!
//! Example `cfg.json`:
//!
//! ```json
//! {
//!     "service_name": "news-harvester",
//!     "load_url": "http://news-drop.example.com/mainstream/posts",
//!     "poll_interval": 30,
//!     "store": { "host": "127.0.0.1", "port": 6379 },
//!     "scratch": { "root": "./tmp", "prefix": "na_" },
//!     "keys": { "namespace": "na:" },
//!     "debug": { "verbose": true }
//! }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for the harvester
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Service name used in startup logging (default: "news-harvester")
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Base URL of the remote directory listing; archives are fetched from
    /// `<load_url>/<filename>`. Must be non-empty by the time [`Config::validate`]
    /// runs (the `-u/--url` CLI flag can supply it).
    #[serde(default)]
    pub load_url: String,

    /// Seconds between harvest cycles; zero means run exactly once (default: 0)
    #[serde(default = "default_poll_interval", with = "duration_serde")]
    pub poll_interval: Duration,

    /// Restrict the next cycle to one named archive from the listing.
    /// Usually supplied via the `-r/--rerun` CLI flag rather than the file.
    #[serde(default)]
    pub rerun: Option<String>,

    /// Durable store connection settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Scratch directory settings
    #[serde(default)]
    pub scratch: ScratchConfig,

    /// Store key names for the dedup sets and the output queue
    #[serde(default)]
    pub keys: KeysConfig,

    /// Debug and test overrides
    #[serde(default)]
    pub debug: DebugFlags,
}

impl Config {
    /// Read a configuration file and parse it as JSON.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the file when it cannot be read,
    /// and a serialization error when the JSON is malformed. Both are fatal
    /// at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "unable to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Fold command-line overrides into the configuration.
    ///
    /// A non-empty `url` replaces `load_url`; a non-empty `rerun` replaces
    /// the rerun request. `None` leaves the file-supplied values alone.
    pub fn apply_overrides(&mut self, url: Option<String>, rerun: Option<String>) {
        if let Some(url) = url
            && !url.is_empty()
        {
            self.load_url = url;
        }
        if let Some(rerun) = rerun
            && !rerun.is_empty()
        {
            self.rerun = Some(rerun);
        }
    }

    /// Check startup invariants that serde defaults cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `load_url` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.load_url.is_empty() {
            return Err(Error::config_key(
                "load_url must be set (in the config file or via --url)",
                "load_url",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            load_url: String::new(),
            poll_interval: default_poll_interval(),
            rerun: None,
            store: StoreConfig::default(),
            scratch: ScratchConfig::default(),
            keys: KeysConfig::default(),
            debug: DebugFlags::default(),
        }
    }
}

/// Durable store (Redis) connection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store hostname (default: "127.0.0.1")
    #[serde(default = "default_store_host")]
    pub host: String,

    /// Store port (default: 6379)
    #[serde(default = "default_store_port")]
    pub port: u16,

    /// Optional AUTH password
    #[serde(default)]
    pub auth: Option<String>,
}

impl StoreConfig {
    /// Build the connection URL for the store client.
    pub fn connection_url(&self) -> String {
        match &self.auth {
            Some(auth) if !auth.is_empty() => {
                format!("redis://:{}@{}:{}", auth, self.host, self.port)
            }
            _ => format!("redis://{}:{}", self.host, self.port),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_store_host(),
            port: default_store_port(),
            auth: None,
        }
    }
}

/// Scratch directory settings
///
/// Each harvest cycle creates one uniquely-named run directory under `root`,
/// holding the downloaded archives and one extraction subdirectory per
/// archive. The root itself is created at startup if missing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScratchConfig {
    /// Directory under which run directories are created (default: "./tmp")
    #[serde(default = "default_scratch_root")]
    pub root: PathBuf,

    /// Name prefix for run directories (default: "na_")
    #[serde(default = "default_scratch_prefix")]
    pub prefix: String,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            root: default_scratch_root(),
            prefix: default_scratch_prefix(),
        }
    }
}

/// Store key names
///
/// The two membership sets share a key scheme: the namespace prefix is
/// concatenated directly with the set name (no separator is inserted, so a
/// namespace of `"na:"` yields `na:downloaded-files`). The output queue key
/// is used as-is, without the namespace.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Namespace prefix for the membership set keys (default: "")
    #[serde(default)]
    pub namespace: String,

    /// Set of archive filenames already accepted for download
    /// (default: "downloaded-files")
    #[serde(default = "default_downloaded_set")]
    pub downloaded_set: String,

    /// Set of member filenames already pushed to the output queue
    /// (default: "loaded-documents")
    #[serde(default = "default_loaded_set")]
    pub loaded_set: String,

    /// Output queue downstream consumers pop from (default: "NEWS_XML")
    #[serde(default = "default_output_queue")]
    pub output_queue: String,
}

impl KeysConfig {
    /// Full store key for the downloaded-archives set.
    pub fn downloaded_set_key(&self) -> String {
        format!("{}{}", self.namespace, self.downloaded_set)
    }

    /// Full store key for the loaded-documents set.
    pub fn loaded_set_key(&self) -> String {
        format!("{}{}", self.namespace, self.loaded_set)
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            downloaded_set: default_downloaded_set(),
            loaded_set: default_loaded_set(),
            output_queue: default_output_queue(),
        }
    }
}

/// Debug and test overrides
///
/// These flags exist for controlled testing against live endpoints; none of
/// them change the dedup bookkeeping, so a debug run still marks what it
/// touches.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DebugFlags {
    /// Log extra detail about each cycle (also lowers the default log filter
    /// to `debug` when `RUST_LOG` is unset)
    #[serde(default)]
    pub verbose: bool,

    /// Truncate the accepted archive list to one entry before fetching
    #[serde(default)]
    pub single_file: bool,

    /// Log each archive's extracted member list
    #[serde(default)]
    pub print_extracted: bool,

    /// Claim members in the loaded-documents set but skip reading and
    /// pushing their content
    #[serde(default)]
    pub skip_content_push: bool,

    /// Leave the run and per-archive scratch directories in place
    #[serde(default)]
    pub retain_scratch: bool,
}

fn default_service_name() -> String {
    "news-harvester".to_string()
}

fn default_poll_interval() -> Duration {
    Duration::ZERO
}

fn default_store_host() -> String {
    "127.0.0.1".to_string()
}

fn default_store_port() -> u16 {
    6379
}

fn default_scratch_root() -> PathBuf {
    PathBuf::from("./tmp")
}

fn default_scratch_prefix() -> String {
    "na_".to_string()
}

fn default_downloaded_set() -> String {
    "downloaded-files".to_string()
}

fn default_loaded_set() -> String {
    "loaded-documents".to_string()
}

fn default_output_queue() -> String {
    "NEWS_XML".to_string()
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

//! Configuration types for slurm-ingest.
//!
//! [`Config::load`] reads `~/.config/slurm-ingest/config.toml` layered on top
//! of the embedded defaults; a missing file is not an error.
//! [`Config::load_from`] reads an explicit file, which must exist.
//! [`Config::defaults`] returns the defaults without touching the filesystem
//! (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[cluster]
name = "default"

[logging]
filter = "info"

[output]
pretty = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[cluster]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Label handed to the upsert sink alongside each record.
    #[serde(default = "default_cluster_name")]
    pub name: String,
}

/// `[logging]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

fn default_cluster_name() -> String { "default".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/slurm-ingest/config.toml`, layered on top of the
    /// built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::build(&config_path(), false)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::build(path, true)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn build(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("slurm-ingest")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

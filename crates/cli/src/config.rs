//! Bridge configuration.
//!
//! Data dir: `--data-dir` / `FEATUREDEV_DATA_DIR` > `~/.featuredev`.
//! Log settings: flag / env > `bridge.toml` in the data dir > defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "bridge.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Explicit filter; `None` falls back to `RUST_LOG`, then the default
    pub filter: Option<String>,
    pub format: LogFormat,
    pub to_file: bool,
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub data_dir: PathBuf,
    pub log: LogSettings,
}

impl BridgeConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Values given on the command line (or their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub log_format: Option<LogFormat>,
    pub log_to_file: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    log: FileLogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileLogConfig {
    filter: Option<String>,
    format: Option<LogFormat>,
    to_file: Option<bool>,
}

pub fn resolve_data_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    let home = dirs::home_dir().context("HOME directory not found")?;
    Ok(home.join(".featuredev"))
}

pub fn load(overrides: Overrides) -> anyhow::Result<BridgeConfig> {
    let data_dir = resolve_data_dir(overrides.data_dir.as_deref())?;
    let file = read_file_config(&data_dir.join(CONFIG_FILE_NAME))?;

    let log = LogSettings {
        filter: overrides.log_filter.or(file.log.filter),
        format: overrides
            .log_format
            .or(file.log.format)
            .unwrap_or_default(),
        to_file: overrides.log_to_file || file.log.to_file.unwrap_or(false),
    };

    Ok(BridgeConfig { data_dir, log })
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

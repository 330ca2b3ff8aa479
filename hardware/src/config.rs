use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file picked up when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "hardware/configs/default.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_trace_cycles")]
    pub trace_cycles: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: default_trace_cycles(),
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    /// Whether the per-cycle diagram should be printed.
    ///
    /// The `always-trace` feature forces tracing on.
    pub fn trace_enabled(&self) -> bool {
        cfg!(feature = "always-trace") || self.trace_cycles
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default)]
    pub legacy_bubble_name: bool,

    #[serde(default = "default_show_stats")]
    pub show_stats: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            legacy_bubble_name: false,
            show_stats: default_show_stats(),
        }
    }
}

impl Config {
    /// Loads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| Error::parse(path, e))
    }

    /// Loads the configuration the CLI runs with.
    ///
    /// An explicit `path` must exist and parse. Without one, the file at
    /// [`DEFAULT_CONFIG_PATH`] is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parses a configuration from an in-memory TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse("<inline>", e))
    }
}

fn default_trace_cycles() -> bool {
    true
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_show_stats() -> bool {
    true
}

//! Configuration structures.
//!
//! Configuration is loaded from a JSON file; missing sections fall back to
//! their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{Error, Result};
use crate::host::HostLayout;

/// File name used by [`Config::load_or_create`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Global bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Host binary contract.
    #[serde(default)]
    pub host: HostConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Host binary contract selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Version label of the host layout contract (see [`HostLayout::KNOWN`]).
    pub layout_version: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            layout_version: HostLayout::DEFAULT.version.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Read a config file. Unknown layout versions are rejected here so a
    /// mismatched host is caught at startup rather than on the first read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("reading config at {}", path.display());
        let file = std::fs::File::open(path)?;
        let config: Config = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `<dir>/config.json`, writing the defaults there first if the file
    /// does not exist yet.
    pub fn load_or_create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path: PathBuf = dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            return Self::from_file(&path);
        }

        let config = Self::default();
        tracing::info!("writing default config to {}", path.display());
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &config)?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.layout()?;
        if self.observability.log_level.trim().is_empty() {
            return Err(Error::validation("observability.log_level cannot be empty"));
        }
        Ok(())
    }

    /// Resolve the configured host layout contract.
    pub fn layout(&self) -> Result<HostLayout> {
        HostLayout::for_version(&self.host.layout_version)
    }
}

//! Core configuration types and loading.

use serde::Deserialize;
use slirc_modes::Casemapping;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_dialect, default_log_filter};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `modecheck` configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Dialect to translate with.
    #[serde(default)]
    pub dialect: DialectConfig,
    /// Logging output.
    #[serde(default)]
    pub log: LogConfig,
    /// Channels seeded into the in-memory snapshot.
    #[serde(default, rename = "channel")]
    pub channels: Vec<ChannelSeed>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Which dialect to load, and how names fold on that network.
#[derive(Debug, Clone, Deserialize)]
pub struct DialectConfig {
    /// Short (`juno`) or module (`protocol/juno`) name.
    #[serde(default = "default_dialect")]
    pub name: String,
    #[serde(default)]
    pub casemapping: Casemapping,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            name: default_dialect(),
            casemapping: Casemapping::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// A channel to place in the snapshot at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSeed {
    pub name: String,
    /// Live modes in the configured dialect, e.g. `+ntF`.
    #[serde(default)]
    pub modes: String,
    /// Parameters for `modes`, in order.
    #[serde(default)]
    pub params: Vec<String>,
    /// Whether the channel has a registration. Implied by `mlock` or `access`.
    #[serde(default)]
    pub registered: bool,
    /// Mode lock of the registration.
    #[serde(default)]
    pub mlock: Option<String>,
    #[serde(default)]
    pub mlock_params: Vec<String>,
    /// Members with NAMES-style prefixes, e.g. `@alice`.
    #[serde(default)]
    pub members: Vec<String>,
    /// Access list of the registration.
    #[serde(default)]
    pub access: Vec<AccessSeed>,
    /// Leave the channel out of the live set; only the registration exists.
    #[serde(default)]
    pub offline: bool,
}

impl ChannelSeed {
    pub fn is_registered(&self) -> bool {
        self.registered || self.mlock.is_some() || !self.access.is_empty()
    }
}

/// One access entry, with services flag letters.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessSeed {
    pub account: String,
    pub flags: String,
}

//! TOML configuration for the pixshard CLI.
//!
//! Every section is optional; missing values fall back to the defaults the
//! image format was designed around (4 data + 2 parity shards).

use std::path::{Path, PathBuf};

use pixshard_types::{CodecConfig, DEFAULT_DATA_SHARDS, DEFAULT_PARITY_SHARDS};
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Erasure coding parameters.
    pub codec: CodecSection,
    /// Output file settings.
    pub output: OutputSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[codec]` section.
///
/// Encoder and decoder must use the same values; they are not recorded in
/// the image.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CodecSection {
    /// Number of data shards.
    pub data_shards: Option<usize>,
    /// Number of parity shards.
    pub parity_shards: Option<usize>,
}

/// `[output]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// File written by `encode` when no filename is given.
    pub default_file: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from("output.png"),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective codec parameters.
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig::new(
            self.codec.data_shards.unwrap_or(DEFAULT_DATA_SHARDS),
            self.codec.parity_shards.unwrap_or(DEFAULT_PARITY_SHARDS),
        )
    }
}

//! `hwtarget.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "hwtarget.toml";

/// Top-level configuration.
///
/// ```toml
/// hardware = ["/opt/arduino/hardware/arduino", "vendor"]
/// default_format = "json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HwtargetConfig {
    /// Folders whose subdirectories are platform directories.
    #[serde(default)]
    pub hardware: Vec<PathBuf>,
    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub default_format: OutputFormat,
}

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl HwtargetConfig {
    /// Load an explicitly named configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: HwtargetConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `hwtarget.toml` from `dir`, if present.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let candidate = dir.join(CONFIG_FILE);
        if !candidate.is_file() {
            return Ok(None);
        }
        Self::load(&candidate).map(Some)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing hwtarget.toml")
    }

    /// Relative hardware paths are relative to the configuration file.
    fn resolve_relative(&mut self, base: &Path) {
        for path in &mut self.hardware {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

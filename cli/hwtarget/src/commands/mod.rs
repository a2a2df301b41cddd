//! CLI command implementations.

pub mod board;
pub mod platform;
pub mod tool;

use std::path::Path;

use anyhow::{Context, Result};
use hwtarget_platform::TargetPlatform;
use hwtarget_prefs::KeyPathMap;
use serde::Serialize;

use crate::config::OutputFormat;

/// Load the platform in `dir`, named `name` or after the directory.
pub(crate) fn load_platform(dir: &Path, name: Option<&str>) -> Result<TargetPlatform> {
    let name = match name {
        Some(n) => n.to_string(),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("platform")
            .to_string(),
    };
    TargetPlatform::load(name, dir)
        .with_context(|| format!("loading platform from {}", dir.display()))
}

/// Pretty JSON for `--format json` output.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing output")
}

/// Indented `key=value` lines.
pub(crate) fn render_map(map: &KeyPathMap, indent: usize) -> String {
    let pad = " ".repeat(indent);
    map.iter().map(|(k, v)| format!("{pad}{k}={v}\n")).collect()
}

/// Render `value` as JSON or with `text` depending on `format`.
pub(crate) fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => to_json(value),
        OutputFormat::Text => Ok(text(value)),
    }
}

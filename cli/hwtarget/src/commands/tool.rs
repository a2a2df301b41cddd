//! `hwtarget programmers` and `hwtarget tool`.

use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Result};
use hwtarget_platform::TargetPlatform;

use super::{emit, load_platform, render_map};
use crate::config::OutputFormat;

/// List the programmers of a platform with their preferences.
pub fn programmers(dir: &Path, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, None)?;
    print!("{}", render_programmers(&platform, format)?);
    Ok(())
}

pub(crate) fn render_programmers(platform: &TargetPlatform, format: OutputFormat) -> Result<String> {
    emit(format, platform.programmers(), |programmers| {
        let mut out = String::new();
        for programmer in programmers {
            let _ = writeln!(out, "{}", programmer.id());
            out.push_str(&render_map(programmer.preferences(), 2));
        }
        if programmers.is_empty() {
            out.push_str("No programmers defined.\n");
        }
        out
    })
}

/// Show the `tools.<tool_id>.*` settings of a platform.
pub fn show(dir: &Path, tool_id: &str, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, None)?;
    print!("{}", render_tool(&platform, tool_id, format)?);
    Ok(())
}

pub(crate) fn render_tool(
    platform: &TargetPlatform,
    tool_id: &str,
    format: OutputFormat,
) -> Result<String> {
    let tool = platform.tool(tool_id);
    if tool.is_empty() {
        bail!("tool '{tool_id}' is not configured in {}", platform.name());
    }
    emit(format, &tool, |tool| render_map(tool, 0))
}

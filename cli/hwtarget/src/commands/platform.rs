//! `hwtarget list` and `hwtarget describe`.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use hwtarget_platform::{discover_platforms, Discovery, PlatformAssembler, TargetPlatform};
use hwtarget_prefs::FsSource;
use serde::Serialize;

use super::{emit, load_platform, render_map};
use crate::config::OutputFormat;

/// Summary row for `hwtarget list`.
#[derive(Debug, Serialize)]
struct PlatformSummary<'a> {
    name: &'a str,
    folder: &'a Path,
    boards: usize,
    programmers: usize,
}

/// List the platforms found in every hardware folder.
pub fn list(hardware: &[PathBuf], format: OutputFormat) -> Result<()> {
    if hardware.is_empty() {
        anyhow::bail!("no hardware folders given; pass --hardware or set `hardware` in hwtarget.toml");
    }
    let assembler = PlatformAssembler::new(FsSource);
    let mut discovery = Discovery::default();
    for dir in hardware {
        discovery.extend(discover_platforms(dir, &assembler)?);
    }
    if let Some(summary) = skipped_summary(&discovery) {
        log::warn!("{summary}");
    }
    print!("{}", render_list(&discovery, format)?);
    Ok(())
}

/// One line naming the directories discovery had to skip, if any.
pub(crate) fn skipped_summary(discovery: &Discovery) -> Option<String> {
    if discovery.failures.is_empty() {
        return None;
    }
    let paths: Vec<String> = discovery
        .failures
        .iter()
        .map(|(path, _)| path.display().to_string())
        .collect();
    Some(format!(
        "{} of {} directories skipped: {}",
        discovery.failures.len(),
        discovery.failures.len() + discovery.platforms.len(),
        paths.join(", ")
    ))
}

pub(crate) fn render_list(discovery: &Discovery, format: OutputFormat) -> Result<String> {
    let rows: Vec<PlatformSummary> = discovery
        .platforms
        .iter()
        .map(|p| PlatformSummary {
            name: p.name(),
            folder: p.folder(),
            boards: p.boards().len(),
            programmers: p.programmers().len(),
        })
        .collect();
    emit(format, &rows, |rows| {
        let mut out = String::new();
        for row in rows {
            let _ = writeln!(
                out,
                "  {:<20} {:>3} boards  {:>3} programmers  {}",
                row.name,
                row.boards,
                row.programmers,
                row.folder.display()
            );
        }
        if rows.is_empty() {
            out.push_str("No platforms found.\n");
        }
        out
    })
}

/// Describe one platform directory.
pub fn describe(dir: &Path, name: Option<&str>, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, name)?;
    print!("{}", render_describe(&platform, format)?);
    Ok(())
}

pub(crate) fn render_describe(platform: &TargetPlatform, format: OutputFormat) -> Result<String> {
    emit(format, platform, |platform| {
        let mut out = String::new();
        let _ = writeln!(out, "=== Platform: {} ===", platform.name());
        let _ = writeln!(out, "Folder: {}", platform.folder().display());
        if let Some(title) = platform.preferences().get("name") {
            let _ = writeln!(out, "Title:  {title}");
        }
        if let Some(version) = platform.preferences().get("version") {
            let _ = writeln!(out, "Version: {version}");
        }
        out.push('\n');

        let _ = writeln!(out, "--- Boards ({}) ---", platform.boards().len());
        for board in platform.boards() {
            let _ = writeln!(out, "  {:<20} {}", board.id(), board.name().unwrap_or(""));
        }
        out.push('\n');

        let _ = writeln!(out, "--- Programmers ({}) ---", platform.programmers().len());
        for programmer in platform.programmers() {
            let _ = writeln!(
                out,
                "  {:<20} {}",
                programmer.id(),
                programmer.name().unwrap_or("")
            );
        }
        out.push('\n');

        let menus = platform.custom_menu_ids();
        let _ = writeln!(out, "--- Custom menus ({}) ---", menus.len());
        for id in menus {
            let _ = writeln!(
                out,
                "  {:<20} {}",
                id,
                platform.custom_menu_title(id).unwrap_or("")
            );
        }
        out.push('\n');

        let _ = writeln!(out, "--- Preferences ({}) ---", platform.preferences().len());
        out.push_str(&render_map(platform.preferences(), 2));
        out
    })
}

//! `hwtarget boards`, `hwtarget board` and `hwtarget menus`.

use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Result};
use hwtarget_platform::{Board, TargetPlatform};
use serde::Serialize;

use super::{emit, load_platform, render_map};
use crate::config::OutputFormat;

/// List the boards of a platform.
pub fn list(dir: &Path, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, None)?;
    print!("{}", render_boards(&platform, format)?);
    Ok(())
}

pub(crate) fn render_boards(platform: &TargetPlatform, format: OutputFormat) -> Result<String> {
    emit(format, platform.boards(), |boards| {
        let mut out = String::new();
        for board in boards {
            let _ = writeln!(out, "  {:<20} {}", board.id(), board.name().unwrap_or(""));
        }
        out
    })
}

/// Show all preferences of one board.
pub fn show(dir: &Path, board_id: &str, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, None)?;
    print!("{}", render_board(&platform, board_id, format)?);
    Ok(())
}

pub(crate) fn render_board(
    platform: &TargetPlatform,
    board_id: &str,
    format: OutputFormat,
) -> Result<String> {
    let Some(board) = platform.board(board_id) else {
        bail!(
            "unknown board '{board_id}' in {}. Use 'hwtarget boards' to see available boards.",
            platform.folder().display()
        );
    };
    emit(format, board, |board| {
        let mut out = String::new();
        let _ = writeln!(out, "=== Board: {} ===", board.id());
        if let Some(name) = board.name() {
            let _ = writeln!(out, "Name: {name}");
        }
        out.push('\n');
        out.push_str(&render_map(board.preferences(), 2));
        out
    })
}

/// Options of one custom menu on one board.
#[derive(Debug, Serialize)]
struct MenuView<'a> {
    id: &'a str,
    title: Option<&'a str>,
    options: Vec<(String, String)>,
}

/// Show the custom menus of a platform, optionally with a board's options.
pub fn menus(dir: &Path, board_id: Option<&str>, format: OutputFormat) -> Result<()> {
    let platform = load_platform(dir, None)?;
    print!("{}", render_menus(&platform, board_id, format)?);
    Ok(())
}

pub(crate) fn render_menus(
    platform: &TargetPlatform,
    board_id: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let board: Option<&Board> = match board_id {
        Some(id) => match platform.board(id) {
            Some(b) => Some(b),
            None => bail!("unknown board '{id}'"),
        },
        None => None,
    };
    let views: Vec<MenuView> = platform
        .custom_menu_ids()
        .into_iter()
        .map(|id| MenuView {
            id,
            title: platform.custom_menu_title(id),
            options: board.map(|b| b.menu_options(id)).unwrap_or_default(),
        })
        .collect();
    emit(format, &views, |views| {
        let mut out = String::new();
        for view in views {
            let _ = writeln!(out, "{} ({})", view.id, view.title.unwrap_or("untitled"));
            for (option, label) in &view.options {
                let _ = writeln!(out, "  {option:<20} {label}");
            }
        }
        if views.is_empty() {
            out.push_str("No custom menus.\n");
        }
        out
    })
}

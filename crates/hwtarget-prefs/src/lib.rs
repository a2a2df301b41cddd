//! Dotted-key preference maps for hardware target definitions.
//!
//! Target definition files (`boards.txt`, `platform.txt`,
//! `programmers.txt`) are flat lists of `a.b.c=value` lines. This crate
//! provides:
//! - **[`KeyPathMap`]:** ordered map with subtree and first-level split
//!   projections over dotted keys
//! - **[`ConfigFileLoader`]:** optional and mandatory file loading
//! - **[`FileSource`]:** the file access seam, with filesystem and
//!   in-memory implementations

pub mod error;
pub mod loader;
pub mod map;
pub mod source;

pub use error::{ParseError, PrefsError, Result};
pub use loader::ConfigFileLoader;
pub use map::KeyPathMap;
pub use source::{FileSource, FsSource, MemorySource};

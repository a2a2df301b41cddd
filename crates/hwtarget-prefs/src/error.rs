//! Error types for preference parsing and loading.

use std::path::PathBuf;

/// A line that is neither blank, a comment, nor a `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: expected `key=value`, found `{content}`")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line as read.
    pub content: String,
}

/// Errors that can occur while loading a preferences file.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    /// A mandatory file is absent or unreadable.
    #[error("could not find {}", path.display())]
    MissingFile {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A file exists but contains a malformed line.
    #[error("error loading {}: {source}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying line error.
        #[source]
        source: ParseError,
    },

    /// A file exists but reading it failed.
    #[error("error reading {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PrefsError {
    /// The file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PrefsError::MissingFile { path }
            | PrefsError::Parse { path, .. }
            | PrefsError::Read { path, .. } => path,
        }
    }
}

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;

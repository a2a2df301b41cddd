//! Error types for target platform operations.

use hwtarget_prefs::PrefsError;

/// Errors that can occur while assembling or discovering platforms.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// A definition file is missing or malformed.
    #[error(transparent)]
    Prefs(#[from] PrefsError),

    /// I/O error while enumerating a hardware folder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TargetError {
    /// The directory is not a platform: its boards file is absent.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, TargetError::Prefs(PrefsError::MissingFile { .. }))
    }

    /// A definition file contains a malformed line.
    pub fn is_parse(&self) -> bool {
        matches!(self, TargetError::Prefs(PrefsError::Parse { .. }))
    }
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;

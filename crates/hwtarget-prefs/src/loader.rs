//! Loading preference files into [`KeyPathMap`]s.
//!
//! Two entry points with distinct policies: [`ConfigFileLoader::load_optional`]
//! treats an absent file as empty, [`ConfigFileLoader::load_mandatory`]
//! reports it as [`PrefsError::MissingFile`].

use std::io;
use std::path::Path;

use crate::error::{PrefsError, Result};
use crate::map::KeyPathMap;
use crate::source::{FileSource, FsSource};

/// Reads `key=value` files through a [`FileSource`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFileLoader<S = FsSource> {
    source: S,
}

impl ConfigFileLoader<FsSource> {
    /// A loader over the real filesystem.
    pub fn fs() -> Self {
        Self::new(FsSource)
    }
}

impl<S: FileSource> ConfigFileLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying file source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load a file that may legitimately be absent.
    ///
    /// Absent or inaccessible files yield an empty map. Malformed content
    /// and other read failures are still errors.
    pub fn load_optional(&self, path: &Path) -> Result<KeyPathMap> {
        if !self.source.is_readable(path) {
            log::trace!("optional file {} not present", path.display());
            return Ok(KeyPathMap::new());
        }
        match self.source.read_to_string(path) {
            Ok(text) => parse(path, &text),
            Err(e) if is_absence(&e) => {
                log::trace!("optional file {} unreadable: {e}", path.display());
                Ok(KeyPathMap::new())
            }
            Err(source) => Err(PrefsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load a file that must exist.
    pub fn load_mandatory(&self, path: &Path) -> Result<KeyPathMap> {
        let missing = || PrefsError::MissingFile {
            path: path.to_path_buf(),
        };
        if !self.source.is_readable(path) {
            return Err(missing());
        }
        let text = self.source.read_to_string(path).map_err(|source| {
            if is_absence(&source) {
                missing()
            } else {
                PrefsError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        parse(path, &text)
    }
}

/// Errors meaning the file is not there for us, as opposed to broken.
fn is_absence(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

fn parse(path: &Path, text: &str) -> Result<KeyPathMap> {
    let map = KeyPathMap::from_lines(text.lines()).map_err(|source| PrefsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} entries from {}", map.len(), path.display());
    Ok(map)
}

//! Discovery of platform directories inside a hardware folder.
//!
//! Every immediate subdirectory of a hardware folder is a platform
//! candidate. A candidate that fails to assemble is recorded and skipped;
//! it never prevents its siblings from loading.

use std::path::{Path, PathBuf};

use hwtarget_prefs::FileSource;

use crate::error::{Result, TargetError};
use crate::platform::{PlatformAssembler, TargetPlatform};

/// Outcome of scanning one hardware folder.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Successfully assembled platforms, sorted by directory name.
    pub platforms: Vec<TargetPlatform>,
    /// Directories that could not be assembled.
    pub failures: Vec<(PathBuf, TargetError)>,
}

impl Discovery {
    /// Look up a discovered platform by name.
    pub fn platform(&self, name: &str) -> Option<&TargetPlatform> {
        self.platforms.iter().find(|p| p.name() == name)
    }

    /// Fold another scan into this one.
    pub fn extend(&mut self, other: Discovery) {
        self.platforms.extend(other.platforms);
        self.failures.extend(other.failures);
    }
}

/// Assemble every platform directory below `hardware_dir`.
///
/// Directories are listed and read through the assembler's file source.
/// Each platform is named after its directory. A missing hardware folder
/// yields an empty result; one that cannot be listed is an I/O error.
pub fn discover_platforms<S: FileSource>(
    hardware_dir: &Path,
    assembler: &PlatformAssembler<S>,
) -> Result<Discovery> {
    let mut discovery = Discovery::default();
    let source = assembler.source();
    if !source.is_dir(hardware_dir) {
        log::debug!("hardware folder {} does not exist", hardware_dir.display());
        return Ok(discovery);
    }

    let mut candidates = Vec::new();
    for path in source.subdirectories(hardware_dir)? {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            candidates.push((name.to_string(), path));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, path) in candidates {
        match assembler.assemble(name, &path) {
            Ok(platform) => discovery.platforms.push(platform),
            Err(e) => {
                log::warn!("skipping platform {}: {e}", path.display());
                discovery.failures.push((path, e));
            }
        }
    }
    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use hwtarget_prefs::{FsSource, MemorySource};

    /// A hardware folder that exists but cannot be listed.
    struct UnlistableSource;

    impl FileSource for UnlistableSource {
        fn is_readable(&self, _path: &Path) -> bool {
            false
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
        }

        fn is_dir(&self, _path: &Path) -> bool {
            true
        }

        fn subdirectories(&self, _path: &Path) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
        }
    }

    #[test]
    fn missing_hardware_dir_is_empty() {
        let discovery = discover_platforms(Path::new("/nonexistent/hardware"), &PlatformAssembler::new(FsSource))
            .unwrap();
        assert!(discovery.platforms.is_empty());
        assert!(discovery.failures.is_empty());
    }

    #[test]
    fn failures_do_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let avr = dir.path().join("avr");
        let sam = dir.path().join("sam");
        let broken = dir.path().join("broken");
        let legacy = dir.path().join("legacy");
        for d in [&avr, &sam, &broken, &legacy] {
            std::fs::create_dir_all(d).unwrap();
        }
        std::fs::write(avr.join("boards.txt"), "uno.name=Uno\n").unwrap();
        std::fs::write(sam.join("boards.txt"), "due.name=Due\n").unwrap();
        std::fs::write(broken.join("boards.txt"), "no equals here\n").unwrap();
        // Not a directory, ignored
        std::fs::write(dir.path().join("README.txt"), "hardware").unwrap();

        let discovery = discover_platforms(dir.path(), &PlatformAssembler::new(FsSource)).unwrap();
        let names: Vec<&str> = discovery.platforms.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["avr", "sam"]);
        assert_eq!(discovery.failures.len(), 2);
        assert_eq!(discovery.failures[0].0, broken);
        assert!(discovery.failures[0].1.is_parse());
        assert_eq!(discovery.failures[1].0, legacy);
        assert!(discovery.failures[1].1.is_missing_file());
        assert!(discovery.platform("sam").unwrap().board("due").is_some());
    }

    #[test]
    fn discovers_in_memory_fixtures() {
        let source = MemorySource::new()
            .with_file("/hw/sam/boards.txt", "due.name=Arduino Due\n")
            .with_file("/hw/avr/boards.txt", "uno.name=Arduino Uno\n")
            .with_file("/hw/avr/programmers.txt", "avrisp.name=AVR ISP\n")
            .with_file("/hw/tools/platform.txt", "name=Tools\n")
            .with_file("/hw/README.txt", "hardware");
        let assembler = PlatformAssembler::new(source);

        let discovery = discover_platforms(Path::new("/hw"), &assembler).unwrap();
        let names: Vec<&str> = discovery.platforms.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["avr", "sam"]);
        assert_eq!(discovery.platform("avr").unwrap().programmers().len(), 1);
        assert_eq!(discovery.failures.len(), 1);
        assert_eq!(discovery.failures[0].0, PathBuf::from("/hw/tools"));
        assert!(discovery.failures[0].1.is_missing_file());
    }

    #[test]
    fn unlistable_hardware_folder_is_io_error() {
        let assembler = PlatformAssembler::new(UnlistableSource);
        let err = discover_platforms(Path::new("/hw"), &assembler).unwrap_err();
        assert!(matches!(err, TargetError::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    }
}

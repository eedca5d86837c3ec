//! Statically-registered archive backends.
//!
//! Discovery is an explicit ordered list: each backend contributes a format
//! predicate and a constructor, and the factory returns the first match.

use std::path::Path;

use tracing::debug;

use crate::error::ContainerError;
use crate::tar::Tar;
use crate::traits::Archive;
use crate::zip::Zip;

/// One registered archive backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendDescriptor {
    pub name: &'static str,
    /// Format-detection predicate (content sniffing, no full parse).
    pub detect: fn(&Path) -> bool,
    /// Open the archive and build its member tree.
    pub open: fn(&Path) -> Result<Box<dyn Archive>, ContainerError>,
}

fn open_tar(path: &Path) -> Result<Box<dyn Archive>, ContainerError> {
    Ok(Box::new(Tar::open(path)?))
}

fn open_zip(path: &Path) -> Result<Box<dyn Archive>, ContainerError> {
    Ok(Box::new(Zip::open(path)?))
}

/// All known backends, in detection order.
pub const BACKENDS: &[BackendDescriptor] = &[
    BackendDescriptor {
        name: "tar",
        detect: Tar::is_tar,
        open: open_tar,
    },
    BackendDescriptor {
        name: "zip",
        detect: Zip::is_zip,
        open: open_zip,
    },
];

/// The first backend whose format predicate matches `path`, if any.
pub fn detect_format(path: &Path) -> Option<&'static BackendDescriptor> {
    BACKENDS.iter().find(|backend| (backend.detect)(path))
}

/// Open `path` with the first matching backend. `Ok(None)` means no backend
/// recognized the format.
pub fn open_container(path: &Path) -> Result<Option<Box<dyn Archive>>, ContainerError> {
    match detect_format(path) {
        Some(backend) => {
            debug!(backend = backend.name, path = %path.display(), "format detected");
            (backend.open)(path).map(Some)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as _;

    #[test]
    fn unknown_formats_detect_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"not an archive at all").unwrap();

        assert!(detect_format(&path).is_none());
        assert!(open_container(&path).unwrap().is_none());
    }

    #[test]
    fn missing_files_detect_as_none() {
        assert!(detect_format(Path::new("/no/such/file.tar")).is_none());
    }

    #[test]
    fn registry_order_is_stable() {
        let names: Vec<_> = BACKENDS.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["tar", "zip"]);
    }
}

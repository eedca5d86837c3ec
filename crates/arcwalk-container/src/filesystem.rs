//! Local filesystem backend: a thin pass-through to OS path queries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ContainerError;
use crate::traits::Container;

/// Container over the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Container for FileSystem {
    fn listdir(&self, path: &Path) -> Result<Vec<String>, ContainerError> {
        let mut names = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn isenterable(&self, path: &Path) -> Result<bool, ContainerError> {
        Ok(path.is_dir())
    }

    fn abspath(&self, path: &Path) -> Result<PathBuf, ContainerError> {
        Ok(std::path::absolute(path)?)
    }

    /// Real same-underlying-file check, so hardlinks and case-mangled paths
    /// to one file compare equal.
    #[cfg(unix)]
    fn samefile(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn samefile(&self, a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn listdir_reports_sorted_names() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("zed.txt")).unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        fs::create_dir(dir.path().join("mid")).unwrap();

        let c = FileSystem::new();
        let names = c.listdir(dir.path()).unwrap();
        assert_eq!(names, vec!["alpha.txt", "mid", "zed.txt"]);
    }

    #[test]
    fn listdir_missing_directory_is_an_error() {
        let c = FileSystem::new();
        assert!(c.listdir(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn directories_are_enterable_files_are_not() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("f.txt")).unwrap();

        let c = FileSystem::new();
        assert!(c.isenterable(dir.path()).unwrap());
        assert!(!c.isenterable(&dir.path().join("f.txt")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn samefile_sees_through_hardlinks() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("original.txt");
        let link = dir.path().join("link.txt");
        File::create(&original).unwrap();
        fs::hard_link(&original, &link).unwrap();

        let c = FileSystem::new();
        assert!(c.samefile(&original, &link));
        assert!(!c.samefile(&original, dir.path()));
    }
}

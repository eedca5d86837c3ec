//! Canned container for tests and UI prototyping.

use std::path::{Path, PathBuf};

use crate::error::ContainerError;
use crate::traits::Container;

/// A container with fixed responses: five entries everywhere, and any path
/// ending in `three` is enterable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dummy;

impl Dummy {
    pub fn new() -> Self {
        Self
    }
}

impl Container for Dummy {
    fn listdir(&self, path: &Path) -> Result<Vec<String>, ContainerError> {
        let names: &[&str] = if self.isenterable(path)? {
            &["three1", "three2", "three3", "three4", "three5"]
        } else {
            &["one", "two", "three", "four", "five"]
        };
        Ok(names.iter().map(|n| (*n).to_owned()).collect())
    }

    fn isenterable(&self, path: &Path) -> Result<bool, ContainerError> {
        Ok(path.to_string_lossy().ends_with("three"))
    }

    fn abspath(&self, path: &Path) -> Result<PathBuf, ContainerError> {
        Ok(path.to_path_buf())
    }
}

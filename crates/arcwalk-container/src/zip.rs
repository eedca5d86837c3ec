//! Zip backend.
//!
//! Member names ending in the separator are directory markers carrying no
//! content; they are skipped at open time, since the tree synthesizes
//! directory nodes from the members beneath them anyway. The open archive
//! handle is kept for extraction (zip supports random access).

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zip::ZipArchive;

use arcwalk_tree::{DirectoryTree, FileNodeRef, Node};

use crate::error::ContainerError;
use crate::traits::{selected_member_names, Archive, Container};

// local file header and empty-archive end-of-central-directory magics
const ZIP_MAGICS: [[u8; 4]; 2] = [[0x50, 0x4b, 0x03, 0x04], [0x50, 0x4b, 0x05, 0x06]];

/// Container over a zip archive's member list.
#[derive(Debug)]
pub struct Zip {
    path: PathBuf,
    archive: RefCell<ZipArchive<File>>,
    tree: DirectoryTree,
}

impl Zip {
    /// Content-sniffing format predicate: a zip local-file-header (or
    /// empty-archive) signature.
    pub fn is_zip(path: &Path) -> bool {
        let Ok(mut file) = File::open(path) else {
            return false;
        };
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic).is_ok() && ZIP_MAGICS.contains(&magic)
    }

    /// Open the archive and build the member tree.
    pub fn open(path: &Path) -> Result<Self, ContainerError> {
        let path = std::path::absolute(path)?;
        let archive = ZipArchive::new(File::open(&path)?)?;
        let tree = DirectoryTree::new(&path);

        let mut members = 0usize;
        for name in archive.file_names() {
            if name.ends_with('/') {
                // directory marker: the tree synthesizes this level itself
                continue;
            }
            trace!(member = name, "inserting zip member");
            tree.add(&path.join(name), false)?;
            members += 1;
        }
        debug!(archive = %path.display(), members, "opened zip container");

        Ok(Self {
            path,
            archive: RefCell::new(archive),
            tree,
        })
    }

    fn node(&self, path: &Path) -> Result<FileNodeRef, ContainerError> {
        self.tree
            .get(path)?
            .ok_or_else(|| ContainerError::UnknownPath(path.to_path_buf()))
    }
}

impl Container for Zip {
    fn listdir(&self, path: &Path) -> Result<Vec<String>, ContainerError> {
        Ok(self.node(path)?.borrow().children_names())
    }

    fn isenterable(&self, path: &Path) -> Result<bool, ContainerError> {
        Ok(!self.node(path)?.borrow().is_leaf())
    }

    fn abspath(&self, path: &Path) -> Result<PathBuf, ContainerError> {
        let node = self.node(path)?;
        Ok(Node::full_path(&node))
    }
}

impl Archive for Zip {
    fn archive_path(&self) -> &Path {
        &self.path
    }

    fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    fn extract(
        &self,
        target: &Path,
        selected: Option<&[FileNodeRef]>,
    ) -> Result<(), ContainerError> {
        let mut archive = self.archive.borrow_mut();
        match selected {
            None => {
                archive.extract(target)?;
                debug!(archive = %self.path.display(), target = %target.display(),
                    "extracted full zip archive");
            }
            Some(nodes) => {
                let wanted = selected_member_names(nodes);
                let mut unpacked = 0usize;
                for index in 0..archive.len() {
                    let mut member = archive.by_index(index)?;
                    let name = member.name().trim_end_matches('/').to_owned();
                    if !wanted.contains(&name) {
                        continue;
                    }
                    // enclosed_name refuses members that climb out of target
                    let Some(relative) = member.enclosed_name() else {
                        continue;
                    };
                    let dest = target.join(relative);
                    if member.is_dir() {
                        fs::create_dir_all(&dest)?;
                    } else {
                        if let Some(parent) = dest.parent() {
                            fs::create_dir_all(parent)?;
                        }
                        let mut out = File::create(&dest)?;
                        io::copy(&mut member, &mut out)?;
                    }
                    unpacked += 1;
                }
                debug!(archive = %self.path.display(), target = %target.display(),
                    unpacked, "extracted selected zip members");
            }
        }
        Ok(())
    }
}

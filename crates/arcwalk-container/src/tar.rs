//! Tar backend: plain and gzip-compressed tar archives.
//!
//! The archive is scanned once at open time; every member name becomes a
//! path in a [`DirectoryTree`] anchored at the archive file itself, and all
//! navigation queries are answered from that tree. Extraction re-opens the
//! archive (tar readers are forward-only).

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, trace};

use arcwalk_tree::{DirectoryTree, FileNodeRef, Node};

use crate::error::ContainerError;
use crate::traits::{selected_member_names, Archive, Container};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Container over a tar archive's member list.
#[derive(Debug)]
pub struct Tar {
    path: PathBuf,
    tree: DirectoryTree,
}

impl Tar {
    /// Content-sniffing format predicate: a ustar header, possibly behind
    /// gzip compression.
    pub fn is_tar(path: &Path) -> bool {
        let Ok(mut reader) = Self::reader(path) else {
            return false;
        };
        let mut header = [0u8; 262];
        if reader.read_exact(&mut header).is_err() {
            return false;
        }
        &header[257..262] == b"ustar"
    }

    /// Open the archive and build the member tree.
    pub fn open(path: &Path) -> Result<Self, ContainerError> {
        let path = std::path::absolute(path)?;
        let tree = DirectoryTree::new(&path);

        let mut archive = ::tar::Archive::new(Self::reader(&path)?);
        let mut members = 0usize;
        for entry in archive.entries()? {
            let entry = entry?;
            let name = entry.path()?;
            trace!(member = %name.display(), "inserting tar member");
            tree.add(&path.join(&name), false)?;
            members += 1;
        }
        debug!(archive = %path.display(), members, "opened tar container");

        Ok(Self { path, tree })
    }

    /// Reader over the archive bytes, transparently gunzipping.
    fn reader(path: &Path) -> Result<Box<dyn Read>, ContainerError> {
        let mut file = File::open(path)?;
        let mut magic = [0u8; 2];
        let got_magic = file.read(&mut magic)? == 2 && magic == GZIP_MAGIC;
        file.seek(SeekFrom::Start(0))?;
        if got_magic {
            Ok(Box::new(GzDecoder::new(BufReader::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    fn node(&self, path: &Path) -> Result<FileNodeRef, ContainerError> {
        self.tree
            .get(path)?
            .ok_or_else(|| ContainerError::UnknownPath(path.to_path_buf()))
    }
}

impl Container for Tar {
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

impl Archive for Tar {
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
        let mut archive = ::tar::Archive::new(Self::reader(&self.path)?);
        match selected {
            None => {
                archive.unpack(target)?;
                debug!(archive = %self.path.display(), target = %target.display(),
                    "extracted full tar archive");
            }
            Some(nodes) => {
                let wanted = selected_member_names(nodes);
                let mut unpacked = 0usize;
                for entry in archive.entries()? {
                    let mut entry = entry?;
                    let name = entry
                        .path()?
                        .to_string_lossy()
                        .trim_end_matches('/')
                        .to_owned();
                    if !wanted.contains(&name) {
                        continue;
                    }
                    entry.unpack_in(target)?;
                    unpacked += 1;
                }
                debug!(archive = %self.path.display(), target = %target.display(),
                    unpacked, "extracted selected tar members");
            }
        }
        Ok(())
    }
}

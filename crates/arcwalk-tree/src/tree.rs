//! The path-indexed directory tree.
//!
//! A [`DirectoryTree`] owns a root node anchored at a fixed `root_dir` and
//! answers every operation by path: insertion rebuilds missing intermediate
//! levels on demand, lookups walk the existing levels one segment at a time.
//!
//! All four path-keyed operations share one shape: split `root_dir` and the
//! query path into ordered segments, require the root's segments to be a
//! prefix of the query's (anything else is [`TreeError::OutOfRange`]), then
//! walk the remaining segments against children.

use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use crate::error::TreeError;
use crate::file_node::{FileData, FileNodeRef, NodeKind};
use crate::node::{Leaves, Node};

/// A tree of path components anchored at a fixed root directory.
#[derive(Debug)]
pub struct DirectoryTree {
    root_dir: PathBuf,
    root: FileNodeRef,
}

impl DirectoryTree {
    /// Create an empty tree anchored at `root_dir`.
    ///
    /// The anchor is not stat'ed: archive-backed trees anchor at the archive
    /// file itself and populate children from its member list.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let root = Node::new_anchor(&root_dir);
        Self { root_dir, root }
    }

    /// The anchor path.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The root node.
    pub fn root(&self) -> &FileNodeRef {
        &self.root
    }

    /// Insert `path`, creating every missing intermediate segment as a
    /// directory stub. Only the final segment honors `recurse`: when set,
    /// the node is built from the real filesystem path (stat plus recursive
    /// expansion); otherwise it is a plain stub.
    ///
    /// Inserting a path that is already present returns the existing node
    /// unchanged. Inserting `root_dir` itself returns the root.
    pub fn add(&self, path: &Path, recurse: bool) -> Result<FileNodeRef, TreeError> {
        let rest = self.relative_segments(path)?;
        let Some((last, intermediates)) = rest.split_last() else {
            return Ok(Rc::clone(&self.root));
        };

        let mut current = Rc::clone(&self.root);
        for name in intermediates {
            let node = Node::add_stub(&current, name, NodeKind::Directory).into_node();
            // a segment used as an intermediate is a directory, whatever an
            // earlier flat listing said
            node.borrow_mut().data_mut().kind = NodeKind::Directory;
            current = node;
        }

        let node = if recurse {
            Node::add_path(&current, path, true)?.into_node()
        } else {
            Node::add_stub(&current, last, NodeKind::File).into_node()
        };
        Ok(node)
    }

    /// True if `path` names an existing node. Walks segment by segment and
    /// answers false at the first unmatched one.
    pub fn contains(&self, path: &Path) -> Result<bool, TreeError> {
        Ok(self.get(path)?.is_some())
    }

    /// Look up the node named by `path`.
    pub fn get(&self, path: &Path) -> Result<Option<FileNodeRef>, TreeError> {
        let rest = self.relative_segments(path)?;
        let mut current = Rc::clone(&self.root);
        for name in &rest {
            let Some(child) = current.borrow().child_named(name) else {
                return Ok(None);
            };
            current = child;
        }
        Ok(Some(current))
    }

    /// Remove the node named by `path`, unlinking it from its parent.
    /// Returns whether a node was removed.
    pub fn remove(&self, path: &Path) -> Result<bool, TreeError> {
        match self.get(path)? {
            Some(node) => {
                Node::detach(&node);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Depth-first iterator over the tree's leaf nodes.
    pub fn leaves(&self) -> Leaves<FileData> {
        Node::leaves(&self.root)
    }

    /// Segments of `path` below `root_dir`, after verifying the prefix
    /// precondition shared by all path-keyed operations.
    fn relative_segments(&self, path: &Path) -> Result<Vec<String>, TreeError> {
        let root_segs = segments(&self.root_dir);
        let mut path_segs = segments(path);
        if path_segs.len() < root_segs.len() || path_segs[..root_segs.len()] != root_segs[..] {
            return Err(TreeError::OutOfRange {
                path: path.to_path_buf(),
                root: self.root_dir.clone(),
            });
        }
        Ok(path_segs.split_off(root_segs.len()))
    }
}

/// Ordered path components, with root and prefix markers dropped.
///
/// Parent-directory markers are kept as literal `".."` segments: archives in
/// the wild report members like `../evil.txt`, and those must stay visible
/// in the tree so extraction can refuse them.
fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_owned()),
            _ => None,
        })
        .collect()
}

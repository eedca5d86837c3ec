//! Path-aware nodes.
//!
//! A file node's payload is one path component plus a directory/file
//! classification. The root of a tree is special: its name is the full
//! anchor path, every other node carries a single basename.
//!
//! Sibling names are unique. Inserting a duplicate component does not create
//! a second node and does not raise: the outcome is an [`Insertion`] that
//! either carries the freshly created node or hands back the existing
//! sibling, which makes repeated insertion of overlapping paths idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TreeError;
use crate::node::{Node, NodeRef};

/// File-type classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn is_dir(self) -> bool {
        matches!(self, NodeKind::Directory)
    }
}

/// Payload of a path-aware node: one path component and its kind.
#[derive(Debug, Clone)]
pub struct FileData {
    /// Root node: the full anchor path. Any other node: a single basename.
    pub name: String,
    pub kind: NodeKind,
}

impl FileData {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
        }
    }
}

/// Two payloads denote the same entry when their names match; kind is not
/// part of identity, so a duplicate name collides regardless of kind.
impl PartialEq for FileData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FileData {}

/// A path-aware tree node.
pub type FileNode = Node<FileData>;

/// Shared handle to a path-aware tree node.
pub type FileNodeRef = NodeRef<FileData>;

/// Outcome of inserting a child component under a parent.
///
/// `Existing` carries the pre-existing sibling of the same name, so the
/// insertion algorithm can keep walking through it without a second lookup.
#[derive(Debug, Clone)]
pub enum Insertion {
    Created(FileNodeRef),
    Existing(FileNodeRef),
}

impl Insertion {
    /// The inserted or pre-existing node.
    pub fn node(&self) -> &FileNodeRef {
        match self {
            Insertion::Created(node) | Insertion::Existing(node) => node,
        }
    }

    /// Consume the outcome, keeping the node.
    pub fn into_node(self) -> FileNodeRef {
        match self {
            Insertion::Created(node) | Insertion::Existing(node) => node,
        }
    }

    /// True if the insertion created a new node.
    pub fn is_created(&self) -> bool {
        matches!(self, Insertion::Created(_))
    }
}

impl Node<FileData> {
    /// Anchor node for a [`crate::DirectoryTree`]: stores the full path, no
    /// stat. Archive roots are anchored this way since their children are
    /// synthetic.
    pub fn new_anchor(path: &Path) -> FileNodeRef {
        Node::new_root(FileData::directory(path.to_string_lossy()))
    }

    /// Root node backed by a real filesystem path.
    ///
    /// Fails with [`TreeError::NotFound`] if the path cannot be stat'ed.
    /// When `recurse` is set and the path is a directory, every entry of a
    /// directory listing is inserted as a child, recursively.
    pub fn from_path(path: &Path, recurse: bool) -> Result<FileNodeRef, TreeError> {
        let meta = stat(path)?;
        let root = Node::new_root(FileData {
            name: path.to_string_lossy().into_owned(),
            kind: kind_of(&meta),
        });
        if recurse && meta.is_dir() {
            expand_dir(&root, path)?;
        }
        Ok(root)
    }

    /// Insert a stub child: no stat, classification supplied by the caller.
    ///
    /// A duplicate name yields `Insertion::Existing` with the sibling.
    pub fn add_stub(parent: &FileNodeRef, name: &str, kind: NodeKind) -> Insertion {
        if let Some(existing) = parent.borrow().child_named(name) {
            return Insertion::Existing(existing);
        }
        let data = FileData {
            name: name.to_owned(),
            kind,
        };
        Insertion::Created(Node::add_child(parent, data))
    }

    /// Insert a child backed by a real filesystem path.
    ///
    /// Stats the path (classification comes from the OS); fails with
    /// [`TreeError::NotFound`] when the stat fails. When `recurse` is set
    /// and the path is a freshly inserted directory, its entries are
    /// inserted recursively. An existing sibling is handed back untouched.
    pub fn add_path(
        parent: &FileNodeRef,
        path: &Path,
        recurse: bool,
    ) -> Result<Insertion, TreeError> {
        let meta = stat(path)?;
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        };
        let inserted = Self::add_stub(parent, &name, kind_of(&meta));
        if recurse && meta.is_dir() && inserted.is_created() {
            expand_dir(inserted.node(), path)?;
        }
        Ok(inserted)
    }

    /// Linear search of direct children by component name.
    pub fn child_named(&self, name: &str) -> Option<FileNodeRef> {
        self.children()
            .iter()
            .find(|c| c.borrow().data().name == name)
            .cloned()
    }

    /// The direct children's names, in insertion order.
    pub fn children_names(&self) -> Vec<String> {
        self.children()
            .iter()
            .map(|c| c.borrow().data().name.clone())
            .collect()
    }

    /// True if the node is classified as a directory.
    pub fn is_dir(&self) -> bool {
        self.data().kind.is_dir()
    }

    /// The full path from the anchor down to `node`.
    ///
    /// The root contributes its stored anchor path directly; every other
    /// ancestor contributes its single component.
    pub fn full_path(node: &FileNodeRef) -> PathBuf {
        Node::data_path(node).into_iter().map(|d| d.name).collect()
    }
}

fn stat(path: &Path) -> Result<fs::Metadata, TreeError> {
    fs::metadata(path).map_err(|source| TreeError::NotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn kind_of(meta: &fs::Metadata) -> NodeKind {
    if meta.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::File
    }
}

fn expand_dir(node: &FileNodeRef, path: &Path) -> Result<(), TreeError> {
    let entries = fs::read_dir(path).map_err(|source| TreeError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| TreeError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Node::add_path(node, &entry.path(), true)?;
    }
    Ok(())
}

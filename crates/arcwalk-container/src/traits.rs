//! The container and archive capability traits.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use arcwalk_tree::{DirectoryTree, FileNodeRef, Node};

use crate::error::ContainerError;

/// Path navigation over one content source.
///
/// All operations are synchronous and run to completion; a container is
/// queried by one logical caller at a time (the browsing UI), so
/// implementations need no internal locking.
pub trait Container {
    /// Ordered names of the entries under `path`.
    ///
    /// Archive backends answer in first-seen member order; the filesystem
    /// backend lists the OS directory sorted by name.
    fn listdir(&self, path: &Path) -> Result<Vec<String>, ContainerError>;

    /// True iff `path` is a directory with enumerable children.
    fn isenterable(&self, path: &Path) -> Result<bool, ContainerError>;

    /// The absolute form of `path` within this container.
    fn abspath(&self, path: &Path) -> Result<PathBuf, ContainerError>;

    /// Everything up to the final component.
    fn dirname(&self, path: &Path) -> PathBuf {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// The final component as a string.
    fn basename(&self, path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Join a name onto a base path.
    fn join(&self, base: &Path, name: &str) -> PathBuf {
        base.join(name)
    }

    /// Split into (dirname, basename).
    fn split(&self, path: &Path) -> (PathBuf, String) {
        (self.dirname(path), self.basename(path))
    }

    /// Whether two paths denote the same entry.
    ///
    /// The default is a case-insensitive textual comparison, which is what
    /// archive-backed containers want: their paths are synthetic and cannot
    /// alias through the OS. [`crate::FileSystem`] overrides this with a
    /// real same-underlying-file check.
    fn samefile(&self, a: &Path, b: &Path) -> bool {
        a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
    }
}

/// Extraction contract of archive-backed containers.
pub trait Archive: Container {
    /// The archive file this container was opened from.
    fn archive_path(&self) -> &Path;

    /// The member tree built at open time. Callers pick selection nodes
    /// from here and hand them back to [`Archive::extract`].
    fn tree(&self) -> &DirectoryTree;

    /// Expand the archive into `target`.
    ///
    /// With a selection, exactly the members named by the selected nodes are
    /// extracted; `None` expands everything. A selected node maps to a
    /// member name by joining its ancestor components with the synthetic
    /// root segment stripped; selections whose first real component is a
    /// parent-directory marker are skipped as unsafe.
    fn extract(
        &self,
        target: &Path,
        selected: Option<&[FileNodeRef]>,
    ) -> Result<(), ContainerError>;
}

/// Member names for a node selection: the ancestor components of each node,
/// root segment stripped, joined with the archive separator.
pub(crate) fn selected_member_names(nodes: &[FileNodeRef]) -> HashSet<String> {
    let mut names = HashSet::new();
    for node in nodes {
        let mut components: Vec<String> = Node::data_path(node)
            .into_iter()
            .map(|data| data.name)
            .collect();
        if components.len() < 2 {
            // the root itself names no member
            continue;
        }
        components.remove(0);
        if components[0] == ".." {
            continue;
        }
        names.insert(components.join("/"));
    }
    names
}

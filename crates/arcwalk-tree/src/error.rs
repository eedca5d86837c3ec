//! Error taxonomy for tree construction and path-keyed operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the tree layer.
///
/// Duplicate insertion is *not* an error: it is reported through
/// [`crate::file_node::Insertion`] and recovered by the insertion algorithm
/// itself, so it never crosses this API.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A real filesystem path could not be stat'ed (missing, permission
    /// denied, or racing with deletion). Aborts the build of that subtree.
    #[error("path not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The queried path does not fall under the tree's root. This is a
    /// caller error (wrong tree queried) and is never recovered internally.
    #[error("path {path} is outside tree root {root}")]
    OutOfRange { path: PathBuf, root: PathBuf },
}

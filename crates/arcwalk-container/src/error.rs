//! Error type shared by all container backends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use arcwalk_tree::TreeError;

/// Errors surfaced by container construction and navigation.
///
/// Construction failures abort creating the container; query failures abort
/// the single operation.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A tree operation failed (out-of-range query, stat failure).
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The underlying file or archive could not be read.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The zip codec rejected the archive or a member.
    #[error("zip codec: {0}")]
    Zip(#[from] ::zip::result::ZipError),

    /// A navigation query named a path this container has no entry for.
    #[error("no entry at {0} in this container")]
    UnknownPath(PathBuf),
}

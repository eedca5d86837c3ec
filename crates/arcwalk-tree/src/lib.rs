//! arcwalk-tree: the path-indexed tree that archive browsing is built on.
//!
//! Archives report their contents as a flat list of member names. This crate
//! turns such lists into a navigable hierarchy:
//!
//! - [`Node`] — a generic parent-linked tree node (`Weak` back-reference to
//!   the parent, owned ordered children)
//! - [`FileData`] / [`FileNodeRef`] — the path-aware payload: one path
//!   component per node, directory/file classification
//! - [`DirectoryTree`] — a root anchored at a fixed directory, with
//!   path-keyed insert, lookup, containment, and removal
//!
//! The tree is single-threaded by design (`Rc`/`RefCell`, deliberately
//! `!Send`): it is built once when a container opens and then queried by one
//! logical caller at a time.

pub mod error;
pub mod file_node;
pub mod node;
pub mod tree;

pub use error::TreeError;
pub use file_node::{FileData, FileNode, FileNodeRef, Insertion, NodeKind};
pub use node::{Leaves, Node, NodeRef};
pub use tree::DirectoryTree;

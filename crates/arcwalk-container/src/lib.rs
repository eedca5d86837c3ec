//! arcwalk-container: one navigation contract over heterogeneous sources.
//!
//! A [`Container`] answers `listdir` / `isenterable` / `abspath` identically
//! whether the entries live on disk or inside an archive:
//!
//! - [`FileSystem`] — thin pass-through to the OS
//! - [`Tar`] / [`Zip`] — build a [`arcwalk_tree::DirectoryTree`] from the
//!   archive's flat member-name list once, then answer every query from the
//!   tree instead of rescanning the archive
//! - [`Dummy`] — canned responses for tests
//!
//! Archive backends additionally implement [`Archive`], which maps selected
//! tree nodes back to member names for extraction. Backend discovery goes
//! through an explicit ordered registry ([`BACKENDS`], [`open_container`]),
//! not runtime introspection.

pub mod dummy;
pub mod error;
pub mod filesystem;
pub mod registry;
pub mod tar;
pub mod traits;
pub mod zip;

pub use dummy::Dummy;
pub use error::ContainerError;
pub use filesystem::FileSystem;
pub use registry::{detect_format, open_container, BackendDescriptor, BACKENDS};
pub use tar::Tar;
pub use traits::{Archive, Container};
pub use zip::Zip;

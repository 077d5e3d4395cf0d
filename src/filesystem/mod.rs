//! In-memory hierarchical file system.
//!
//! Directories own their files and subdirectories outright, so the tree has
//! no shared nodes and no back-references. [`FileSystem`] is the entry point:
//! it resolves paths, searches by name across the whole tree, and keeps track
//! of the single largest file.

mod biggest_file;
mod config;
mod directory;
mod entity;
mod error;
mod file;
mod file_system;
pub mod path;
mod render;

pub use biggest_file::BiggestFile;
pub use config::{DEFAULT_SEPARATOR, DeleteMatch, FileSystemConfig, NameScope};
pub use directory::{Directory, Removed};
pub use entity::{Entity, EntityName, MAX_NAME_LENGTH, Metadata};
pub use error::{EntityKind, FileSystemError, Result};
pub use file::File;
pub use file_system::FileSystem;
pub use render::{Listing, RenderLine, RenderedEntry};

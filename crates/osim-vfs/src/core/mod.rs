//! Core VFS types and utilities

mod error;
mod path;
mod types;

pub use error::{FsError, FsResult};
pub use path::{display_path, resolve_path, split_last};
pub use types::{Access, DirEntry, FileMode, FsNode, NodeBody, NodeKind};

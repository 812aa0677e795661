//! FsService trait definition.

use crate::core::{DirEntry, FileMode, FsResult};

/// Virtual filesystem service interface.
///
/// Paths may be absolute or relative to the session's current directory.
/// Every operation acts as the session's current user and either fully
/// applies or leaves the filesystem unchanged.
pub trait FsService {
    // ========== Session ==========

    /// Current directory as an absolute path.
    fn pwd(&self) -> String;

    /// Names of the configured users.
    fn users(&self) -> Vec<String>;

    /// Name of the active user.
    fn current_user(&self) -> &str;

    /// Make `username` the active user.
    fn switch_user(&mut self, username: &str) -> FsResult<()>;

    /// Change the current directory. `..` at root is a no-op.
    fn change_directory(&mut self, path: &str) -> FsResult<String>;

    // ========== Directory Operations ==========

    /// List directory contents.
    fn list(&self, path: &str) -> FsResult<Vec<DirEntry>>;

    /// Create a directory (mode defaults to 755).
    fn make_directory(&mut self, path: &str, mode: Option<FileMode>) -> FsResult<()>;

    /// Remove a file, or a directory with its whole subtree.
    fn remove(&mut self, path: &str) -> FsResult<()>;

    // ========== File Operations ==========

    /// Create a file (mode defaults to 644).
    fn create_file(&mut self, path: &str, content: &[u8], mode: Option<FileMode>) -> FsResult<()>;

    /// Read a file.
    fn read_file(&self, path: &str) -> FsResult<Vec<u8>>;

    /// Replace a file's content.
    fn write_file(&mut self, path: &str, content: &[u8]) -> FsResult<()>;

    // ========== Metadata Operations ==========

    /// Get file/directory metadata.
    fn stat(&self, path: &str) -> FsResult<DirEntry>;

    /// Change permissions (owner or superuser).
    fn chmod(&mut self, path: &str, mode: FileMode) -> FsResult<()>;

    /// Change ownership (superuser only).
    fn chown(&mut self, path: &str, owner: &str) -> FsResult<()>;
}

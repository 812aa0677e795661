//! Permission checking utilities for the VFS layer.
//!
//! The owner tier applies when the user owns the node, the other tier
//! otherwise. The superuser passes every check.

use crate::core::{Access, FsNode};

/// Name of the user that bypasses permission checks.
pub const SUPERUSER: &str = "root";

/// Access tier that applies to `user` on `node`.
fn tier<'a>(node: &'a FsNode, user: &str) -> &'a Access {
    if node.owner == user {
        &node.mode.owner
    } else {
        &node.mode.other
    }
}

/// Check if `user` has read permission on a node.
pub fn check_read(node: &FsNode, user: &str) -> bool {
    user == SUPERUSER || tier(node, user).read
}

/// Check if `user` has write permission on a node.
pub fn check_write(node: &FsNode, user: &str) -> bool {
    user == SUPERUSER || tier(node, user).write
}

/// Check if `user` may enter a directory.
pub fn check_execute(node: &FsNode, user: &str) -> bool {
    if !node.is_directory() {
        return false;
    }
    user == SUPERUSER || tier(node, user).execute
}

/// Check if `user` may remove `node` from `parent`.
///
/// Allowed for the superuser, the node's owner, or anyone who can write
/// the parent directory.
pub fn check_remove(node: &FsNode, parent: &FsNode, user: &str) -> bool {
    user == SUPERUSER || node.owner == user || check_write(parent, user)
}

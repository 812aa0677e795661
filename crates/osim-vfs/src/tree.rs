//! In-memory node store.
//!
//! A strict tree rooted at `/`: every non-root node is owned by exactly one
//! parent's child map, so cycles and shared nodes cannot be expressed.
//! Lookups walk resolved path components; the tree does no permission
//! checking of its own.

use crate::core::{display_path, resolve_path, split_last, FileMode, FsError, FsNode, FsResult};
use crate::service::SUPERUSER;

/// The filesystem tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsTree {
    root: FsNode,
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FsTree {
    /// Create a tree holding only `/` (owner root, mode 755).
    pub fn new() -> Self {
        Self {
            root: FsNode::new_directory("", SUPERUSER, FileMode::dir_default()),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &FsNode {
        &self.root
    }

    /// Look up the node at `components`.
    ///
    /// Fails `NotADirectory` when an intermediate component is a file and
    /// `NotFound` when a component is missing.
    pub fn get(&self, components: &[String]) -> FsResult<&FsNode> {
        let mut node = &self.root;
        for (depth, name) in components.iter().enumerate() {
            let children = node
                .children()
                .ok_or_else(|| FsError::NotADirectory(display_path(&components[..depth])))?;
            node = children
                .get(name)
                .ok_or_else(|| FsError::NotFound(display_path(&components[..=depth])))?;
        }
        Ok(node)
    }

    /// Mutable lookup, same failure rules as [`FsTree::get`].
    pub fn get_mut(&mut self, components: &[String]) -> FsResult<&mut FsNode> {
        let mut node = &mut self.root;
        for (depth, name) in components.iter().enumerate() {
            let children = node
                .children_mut()
                .ok_or_else(|| FsError::NotADirectory(display_path(&components[..depth])))?;
            node = children
                .get_mut(name)
                .ok_or_else(|| FsError::NotFound(display_path(&components[..=depth])))?;
        }
        Ok(node)
    }

    /// Resolve `path` against `cwd`.
    ///
    /// Every segment the walk passes through must be an existing directory,
    /// even when a later `..` leaves it again. The final component may be
    /// missing.
    pub fn resolve(&self, cwd: &[String], path: &str) -> FsResult<Vec<String>> {
        resolve_path(cwd, path, |prefix| self.directory(prefix).map(|_| ()))
    }

    /// Look up a node that must be a directory.
    pub fn directory(&self, components: &[String]) -> FsResult<&FsNode> {
        let node = self.get(components)?;
        if !node.is_directory() {
            return Err(FsError::NotADirectory(display_path(components)));
        }
        Ok(node)
    }

    /// Insert `node` into the directory at `parent`.
    pub fn insert(&mut self, parent: &[String], node: FsNode) -> FsResult<()> {
        let dir = self.get_mut(parent)?;
        let children = dir
            .children_mut()
            .ok_or_else(|| FsError::NotADirectory(display_path(parent)))?;

        if children.contains_key(&node.name) {
            let mut path = parent.to_vec();
            path.push(node.name.clone());
            return Err(FsError::AlreadyExists(display_path(&path)));
        }

        children.insert(node.name.clone(), node);
        Ok(())
    }

    /// Detach and return the node at `components` with its subtree.
    pub fn remove(&mut self, components: &[String]) -> FsResult<FsNode> {
        let (parent, name) = split_last(components)
            .ok_or_else(|| FsError::invalid("el directorio raíz no se puede eliminar"))?;

        self.get_mut(parent)?
            .children_mut()
            .ok_or_else(|| FsError::NotADirectory(display_path(parent)))?
            .remove(name)
            .ok_or_else(|| FsError::NotFound(display_path(components)))
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        subtree_size(&self.root)
    }
}

/// Number of nodes in the subtree rooted at `node`.
pub fn subtree_size(node: &FsNode) -> usize {
    1 + node
        .children()
        .map_or(0, |children| children.values().map(subtree_size).sum())
}

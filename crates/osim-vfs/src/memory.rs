//! In-memory filesystem engine.
//!
//! Combines the node tree, the user registry and the session into the
//! [`FsService`] implementation. All checks run before the tree is touched,
//! so a failed operation never leaves a partial change behind.

use tracing::debug;

use crate::core::{
    display_path, split_last, DirEntry, FileMode, FsError, FsNode, FsResult,
    NodeBody,
};
use crate::service::{check_execute, check_read, check_remove, check_write, FsService, SUPERUSER};
use crate::session::{Session, UserRegistry};
use crate::tree::{subtree_size, FsTree};

/// In-memory filesystem with a single session.
#[derive(Clone, Debug)]
pub struct MemoryFs {
    tree: FsTree,
    users: UserRegistry,
    session: Session,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new(UserRegistry::default())
    }
}

impl MemoryFs {
    /// Create a filesystem holding only `/`, with root logged in.
    pub fn new(users: UserRegistry) -> Self {
        Self {
            tree: FsTree::new(),
            users,
            session: Session::new(),
        }
    }

    /// The node tree.
    pub fn tree(&self) -> &FsTree {
        &self.tree
    }

    /// The configured users.
    pub fn registry(&self) -> &UserRegistry {
        &self.users
    }

    /// Resolve `path` against the current directory.
    fn resolve(&self, path: &str) -> FsResult<Vec<String>> {
        self.tree.resolve(&self.session.current_dir, path)
    }

    fn user(&self) -> &str {
        &self.session.current_user
    }

    /// Validate and insert a new node under the parent of `path`.
    ///
    /// Shared by `make_directory` and `create_file`.
    fn create_node(&mut self, path: &str, build: impl FnOnce(&str, &str) -> FsNode) -> FsResult<String> {
        let components = self.resolve(path)?;
        let (parent, name) = split_last(&components)
            .ok_or_else(|| FsError::AlreadyExists(String::from("/")))?;

        let parent_node = self.tree.directory(parent)?;
        if parent_node
            .children()
            .is_some_and(|children| children.contains_key(name))
        {
            return Err(FsError::AlreadyExists(display_path(&components)));
        }
        if !check_write(parent_node, self.user()) {
            return Err(FsError::denied(display_path(parent), "escritura"));
        }

        let node = build(name, self.user());
        self.tree.insert(parent, node)?;
        Ok(display_path(&components))
    }
}

impl FsService for MemoryFs {
    fn pwd(&self) -> String {
        self.session.pwd()
    }

    fn users(&self) -> Vec<String> {
        self.users.names()
    }

    fn current_user(&self) -> &str {
        self.user()
    }

    fn switch_user(&mut self, username: &str) -> FsResult<()> {
        if !self.users.contains(username) {
            return Err(FsError::UnknownUser(String::from(username)));
        }
        self.session.current_user = String::from(username);
        debug!(user = username, "switched user");
        Ok(())
    }

    fn change_directory(&mut self, path: &str) -> FsResult<String> {
        if path.trim() == ".." {
            self.session.current_dir.pop();
            return Ok(self.pwd());
        }

        let components = self.resolve(path)?;
        let node = self.tree.directory(&components)?;
        if !check_execute(node, self.user()) {
            return Err(FsError::denied(display_path(&components), "ejecución"));
        }

        self.session.current_dir = components;
        debug!(cwd = %self.pwd(), "changed directory");
        Ok(self.pwd())
    }

    fn list(&self, path: &str) -> FsResult<Vec<DirEntry>> {
        let components = self.resolve(path)?;
        let node = self.tree.directory(&components)?;
        if !check_read(node, self.user()) {
            return Err(FsError::denied(display_path(&components), "lectura"));
        }

        Ok(node
            .children()
            .map(|children| children.values().map(DirEntry::from).collect())
            .unwrap_or_default())
    }

    fn make_directory(&mut self, path: &str, mode: Option<FileMode>) -> FsResult<()> {
        let mode = mode.unwrap_or_else(FileMode::dir_default);
        let created = self.create_node(path, |name, owner| {
            FsNode::new_directory(name, owner, mode)
        })?;
        debug!(path = %created, mode = %mode, owner = self.user(), "directory created");
        Ok(())
    }

    fn remove(&mut self, path: &str) -> FsResult<()> {
        let components = self.resolve(path)?;
        let Some((parent, _)) = split_last(&components) else {
            return Err(FsError::denied("/", "escritura"));
        };

        let node = self.tree.get(&components)?;
        let parent_node = self.tree.get(parent)?;
        if !check_remove(node, parent_node, self.user()) {
            return Err(FsError::denied(display_path(parent), "escritura"));
        }

        let removed = self.tree.remove(&components)?;

        // Keep the session inside the tree when its directory goes away
        if self.session.current_dir.starts_with(&components) {
            self.session.current_dir = parent.to_vec();
        }

        debug!(
            path = %display_path(&components),
            nodes = subtree_size(&removed),
            "removed"
        );
        Ok(())
    }

    fn create_file(&mut self, path: &str, content: &[u8], mode: Option<FileMode>) -> FsResult<()> {
        let mode = mode.unwrap_or_else(FileMode::file_default);
        let created = self.create_node(path, |name, owner| {
            FsNode::new_file(name, owner, mode, content.to_vec())
        })?;
        debug!(path = %created, mode = %mode, bytes = content.len(), "file created");
        Ok(())
    }

    fn read_file(&self, path: &str) -> FsResult<Vec<u8>> {
        let components = self.resolve(path)?;
        let node = self.tree.get(&components)?;
        let NodeBody::File(content) = &node.body else {
            return Err(FsError::NotAFile(display_path(&components)));
        };
        if !check_read(node, self.user()) {
            return Err(FsError::denied(display_path(&components), "lectura"));
        }
        Ok(content.clone())
    }

    fn write_file(&mut self, path: &str, content: &[u8]) -> FsResult<()> {
        let components = self.resolve(path)?;
        let user = self.session.current_user.clone();
        let node = self.tree.get_mut(&components)?;
        if !node.is_file() {
            return Err(FsError::NotAFile(display_path(&components)));
        }
        if !check_write(node, &user) {
            return Err(FsError::denied(display_path(&components), "escritura"));
        }

        node.body = NodeBody::File(content.to_vec());
        debug!(path = %display_path(&components), bytes = content.len(), "file written");
        Ok(())
    }

    fn stat(&self, path: &str) -> FsResult<DirEntry> {
        let components = self.resolve(path)?;
        let node = self.tree.get(&components)?;
        let mut entry = DirEntry::from(node);
        if components.is_empty() {
            entry.name = String::from("/");
        }
        Ok(entry)
    }

    fn chmod(&mut self, path: &str, mode: FileMode) -> FsResult<()> {
        let components = self.resolve(path)?;
        let user = self.session.current_user.clone();
        let node = self.tree.get_mut(&components)?;
        if user != SUPERUSER && node.owner != user {
            return Err(FsError::denied(display_path(&components), "propiedad"));
        }

        node.mode = mode;
        debug!(path = %display_path(&components), mode = %mode, "mode changed");
        Ok(())
    }

    fn chown(&mut self, path: &str, owner: &str) -> FsResult<()> {
        let components = self.resolve(path)?;
        self.tree.get(&components)?;
        if self.user() != SUPERUSER {
            return Err(FsError::denied(display_path(&components), "superusuario"));
        }
        if !self.users.contains(owner) {
            return Err(FsError::UnknownUser(String::from(owner)));
        }

        let node = self.tree.get_mut(&components)?;
        node.owner = String::from(owner);
        debug!(path = %display_path(&components), owner, "owner changed");
        Ok(())
    }
}

//! Users and the session state of the simulated shell.

use serde::{Deserialize, Serialize};

use crate::core::display_path;
use crate::service::SUPERUSER;

/// First uid handed out to non-root users.
pub const FIRST_USER_UID: u32 = 1001;

/// Group assigned to non-root users.
pub const USERS_GROUP: &str = "usuarios";

/// A configured user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub name: String,
    /// Numeric user id
    pub uid: u32,
    /// Primary group
    pub group: String,
}

/// The fixed set of users known to the filesystem.
///
/// `root` is always present and always first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::from_names(["usuario1", "usuario2"])
    }
}

impl UserRegistry {
    /// Build a registry from user names.
    ///
    /// `root` (uid 0) is added if missing; duplicates, blank names and names
    /// that are not a single path component (`.`, `..`, anything with `/`)
    /// are dropped. Other users get consecutive uids from [`FIRST_USER_UID`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut users = vec![User {
            name: String::from(SUPERUSER),
            uid: 0,
            group: String::from(SUPERUSER),
        }];

        for name in names {
            let name = name.as_ref().trim();
            if !is_valid_name(name) || users.iter().any(|u| u.name == name) {
                continue;
            }
            let uid = FIRST_USER_UID + (users.len() as u32 - 1);
            users.push(User {
                name: String::from(name),
                uid,
                group: String::from(USERS_GROUP),
            });
        }

        Self { users }
    }

    /// Look up a user by name.
    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Check if a user exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// User names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.users.iter().map(|u| u.name.clone()).collect()
    }

    /// All users in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }
}

/// A user name must be usable as a single path component.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

/// Active user and current directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Active user name (always in the registry)
    pub current_user: String,
    /// Current directory as components below root (always a directory)
    pub current_dir: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start as root in `/`.
    pub fn new() -> Self {
        Self {
            current_user: String::from(SUPERUSER),
            current_dir: Vec::new(),
        }
    }

    /// Current directory as an absolute path.
    pub fn pwd(&self) -> String {
        display_path(&self.current_dir)
    }
}

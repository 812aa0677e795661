//! Filesystem bootstrap.
//!
//! Builds the initial directory layout on a fresh tree.

use tracing::debug;

use crate::core::{FileMode, FsResult};
use crate::service::{FsService, SUPERUSER};
use crate::session::UserRegistry;

/// Bootstrap the initial directory structure.
///
/// Creates the following hierarchy:
/// ```text
/// /
/// ├── home/          (root, 755)
/// │   ├── usuario1/  (usuario1, 755)
/// │   └── usuario2/  (usuario2, 755)
/// └── tmp/           (root, 777)
/// ```
///
/// Runs as root and restores the previous user afterwards. This function is
/// idempotent: if `/home` already exists it only cleans `/tmp`.
pub fn bootstrap_filesystem<F: FsService>(fs: &mut F, users: &UserRegistry) -> FsResult<()> {
    let previous = String::from(fs.current_user());
    fs.switch_user(SUPERUSER)?;

    let result = if fs.stat("/home").is_ok() {
        clean_tmp(fs)
    } else {
        create_layout(fs, users)
    };

    fs.switch_user(&previous)?;
    result
}

/// Create /home, one home per user and /tmp.
fn create_layout<F: FsService>(fs: &mut F, users: &UserRegistry) -> FsResult<()> {
    fs.make_directory("/home", Some(FileMode::dir_default()))?;
    for user in users.iter().filter(|u| u.name != SUPERUSER) {
        create_user_home(fs, &user.name)?;
    }

    fs.make_directory("/tmp", Some(FileMode::world_rw()))?;
    debug!(users = users.names().len(), "filesystem bootstrapped");
    Ok(())
}

/// Create `/home/<user>` owned by that user. Requires root.
pub fn create_user_home<F: FsService>(fs: &mut F, user: &str) -> FsResult<()> {
    let home = format!("/home/{}", user);
    fs.make_directory(&home, Some(FileMode::dir_default()))?;
    fs.chown(&home, user)
}

/// Remove everything under /tmp.
pub fn clean_tmp<F: FsService>(fs: &mut F) -> FsResult<()> {
    if fs.stat("/tmp").is_err() {
        return Ok(());
    }

    for entry in fs.list("/tmp")? {
        fs.remove(&format!("/tmp/{}", entry.name))?;
    }
    Ok(())
}

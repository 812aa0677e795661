//! Path utilities for the VFS layer.
//!
//! Paths resolve into a list of components below root. Absolute paths start
//! from root, relative paths from the current directory.

use crate::core::FsResult;

/// Resolve `path` against `cwd`, handling `.`, `..` and redundant slashes.
///
/// Every segment followed by another segment is a directory the walk passes
/// through: `check` runs on that prefix before `..` can pop it, so
/// `/missing/..` fails instead of folding away. `..` at root stays at root.
/// An empty path resolves to `cwd`.
pub fn resolve_path<F>(cwd: &[String], path: &str, mut check: F) -> FsResult<Vec<String>>
where
    F: FnMut(&[String]) -> FsResult<()>,
{
    let mut components: Vec<String> = if path.starts_with('/') {
        Vec::new()
    } else {
        cwd.to_vec()
    };

    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
    while let Some(segment) = segments.next() {
        match segment {
            "." => {}
            ".." => {
                components.pop();
            }
            name => components.push(String::from(name)),
        }
        if segments.peek().is_some() {
            check(&components)?;
        }
    }

    Ok(components)
}

/// Render components as an absolute path string.
pub fn display_path(components: &[String]) -> String {
    if components.is_empty() {
        return String::from("/");
    }

    let mut result = String::new();
    for component in components {
        result.push('/');
        result.push_str(component);
    }
    result
}

/// Split resolved components into parent components and the final name.
///
/// Returns `None` for root, which has no parent.
pub fn split_last(components: &[String]) -> Option<(&[String], &str)> {
    components
        .split_last()
        .map(|(name, parent)| (parent, name.as_str()))
}

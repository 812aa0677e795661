//! Core types for the VFS layer.
//!
//! Defines FsNode, FileMode and directory entry types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FsError;

/// One permission digit: read, write and execute bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Access {
    /// Can read (list, for directories)
    pub read: bool,
    /// Can write (create/remove children, for directories)
    pub write: bool,
    /// Can execute (enter, for directories)
    pub execute: bool,
}

impl Access {
    /// Unpack from an octal digit (0-7)
    pub fn from_bits(bits: u8) -> Self {
        Self {
            read: bits & 0b100 != 0,
            write: bits & 0b010 != 0,
            execute: bits & 0b001 != 0,
        }
    }

    /// Pack into an octal digit
    pub fn bits(&self) -> u8 {
        let mut b = 0u8;
        if self.read {
            b |= 0b100;
        }
        if self.write {
            b |= 0b010;
        }
        if self.execute {
            b |= 0b001;
        }
        b
    }
}

/// Unix-like permission mode, written as three octal digits ("755").
///
/// Access checks use the owner and other tiers; the group digit is kept so
/// the mode round-trips unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileMode {
    /// Owner tier
    pub owner: Access,
    /// Group tier (stored, not enforced)
    pub group: Access,
    /// Everyone else
    pub other: Access,
}

impl FileMode {
    /// Build a mode from an octal number such as `0o755`.
    pub const fn from_octal(mode: u16) -> Self {
        const fn digit(bits: u16) -> Access {
            Access {
                read: bits & 0b100 != 0,
                write: bits & 0b010 != 0,
                execute: bits & 0b001 != 0,
            }
        }
        Self {
            owner: digit((mode >> 6) & 0o7),
            group: digit((mode >> 3) & 0o7),
            other: digit(mode & 0o7),
        }
    }

    /// Default mode for new directories (rwxr-xr-x)
    pub const fn dir_default() -> Self {
        Self::from_octal(0o755)
    }

    /// Default mode for new files (rw-r--r--)
    pub const fn file_default() -> Self {
        Self::from_octal(0o644)
    }

    /// World read-write (for /tmp)
    pub const fn world_rw() -> Self {
        Self::from_octal(0o777)
    }

    /// Mode as an octal number.
    pub fn octal(&self) -> u16 {
        (u16::from(self.owner.bits()) << 6)
            | (u16::from(self.group.bits()) << 3)
            | u16::from(self.other.bits())
    }
}

impl FromStr for FileMode {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits: Vec<u8> = s
            .chars()
            .map(|c| match c {
                '0'..='7' => Ok(c as u8 - b'0'),
                _ => Err(()),
            })
            .collect::<Result<_, _>>()
            .map_err(|_| FsError::invalid(format!("permisos '{}' no son octales", s)))?;

        match digits.as_slice() {
            [owner, group, other] => Ok(Self {
                owner: Access::from_bits(*owner),
                group: Access::from_bits(*group),
                other: Access::from_bits(*other),
            }),
            _ => Err(FsError::invalid(format!(
                "permisos '{}' deben tener tres dígitos",
                s
            ))),
        }
    }
}

impl TryFrom<String> for FileMode {
    type Error = FsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.owner.bits(),
            self.group.bits(),
            self.other.bits()
        )
    }
}

/// Type of filesystem entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file
    #[serde(rename = "archivo")]
    File,

    /// Directory
    #[serde(rename = "directorio")]
    Directory,
}

/// Kind-specific payload of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeBody {
    /// File content
    File(Vec<u8>),
    /// Children by name
    Directory(BTreeMap<String, FsNode>),
}

/// A file or directory in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsNode {
    /// Path segment (empty for root)
    pub name: String,
    /// Owning user name
    pub owner: String,
    /// Access permissions
    pub mode: FileMode,
    /// Content or children
    pub body: NodeBody,
}

impl FsNode {
    /// Create a new empty directory node.
    pub fn new_directory(name: impl Into<String>, owner: impl Into<String>, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            mode,
            body: NodeBody::Directory(BTreeMap::new()),
        }
    }

    /// Create a new file node.
    pub fn new_file(
        name: impl Into<String>,
        owner: impl Into<String>,
        mode: FileMode,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            mode,
            body: NodeBody::File(content),
        }
    }

    /// Type of this node.
    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File(_) => NodeKind::File,
            NodeBody::Directory(_) => NodeKind::Directory,
        }
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.body, NodeBody::Directory(_))
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.body, NodeBody::File(_))
    }

    /// Content length in bytes (files only).
    pub fn size(&self) -> Option<u64> {
        match &self.body {
            NodeBody::File(content) => Some(content.len() as u64),
            NodeBody::Directory(_) => None,
        }
    }

    /// Children of a directory.
    pub fn children(&self) -> Option<&BTreeMap<String, FsNode>> {
        match &self.body {
            NodeBody::Directory(children) => Some(children),
            NodeBody::File(_) => None,
        }
    }

    /// Mutable children of a directory.
    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, FsNode>> {
        match &mut self.body {
            NodeBody::Directory(children) => Some(children),
            NodeBody::File(_) => None,
        }
    }
}

/// Directory entry returned by `list`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name
    #[serde(rename = "nombre")]
    pub name: String,

    /// File or directory
    #[serde(rename = "tipo")]
    pub kind: NodeKind,

    /// Owning user name
    #[serde(rename = "propietario")]
    pub owner: String,

    /// Mode string, e.g. "644"
    #[serde(rename = "permisos")]
    pub mode: FileMode,

    /// Content length (files only)
    #[serde(rename = "tamanio", skip_serializing_if = "Option::is_none", default)]
    pub size: Option<u64>,
}

impl From<&FsNode> for DirEntry {
    fn from(node: &FsNode) -> Self {
        Self {
            name: node.name.clone(),
            kind: node.kind(),
            owner: node.owner.clone(),
            mode: node.mode,
            size: node.size(),
        }
    }
}

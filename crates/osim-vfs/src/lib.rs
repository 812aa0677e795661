//! OS Simulator - Virtual Filesystem
//!
//! An in-memory hierarchical filesystem with Unix-style users, ownership and
//! permission bits, driven by a single shell-like session:
//!
//! - **Core**: node/mode types, path resolution and the error type
//! - **Service**: the `FsService` trait and permission checks
//! - **Tree**: the node store rooted at `/`
//! - **Session**: configured users, current user and current directory
//! - **Memory**: `MemoryFs`, the engine tying the above together
//! - **Bootstrap**: initial `/home` and `/tmp` layout
//!
//! # Design Principles
//!
//! 1. **Hierarchical paths**: Unix-like `/path/to/file` semantics, `.` and `..`
//! 2. **Owner/other permissions**: Access controlled by ownership and mode bits
//! 3. **Atomic operations**: Every check runs before the tree is touched
//! 4. **Strict tree**: Nodes are owned by their parent; no links, no cycles
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         MemoryFs                                  │
//! │                                                                   │
//! │  ┌───────────────────┐   ┌─────────────────────────────────────┐ │
//! │  │     Session       │   │         FsService operations        │ │
//! │  │  • current user   │──▶│  • resolve path   • check perms     │ │
//! │  │  • current dir    │   │  • mkdir/create   • read/write/rm   │ │
//! │  └───────────────────┘   └──────────────────┬──────────────────┘ │
//! │                                             │                    │
//! │                                             ▼                    │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                        FsTree                             │   │
//! │  │   /  ─┬─ home/ ─┬─ usuario1/                              │   │
//! │  │       │         └─ usuario2/                              │   │
//! │  │       └─ tmp/                                             │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod core;
pub mod service;
pub mod session;
pub mod tree;

pub mod bootstrap;
pub mod memory;

// Convenient re-exports at crate root
pub use bootstrap::bootstrap_filesystem;
pub use core::{display_path, resolve_path};
pub use core::{DirEntry, FileMode, FsError, FsNode, FsResult, NodeKind};
pub use memory::MemoryFs;
pub use service::{check_execute, check_read, check_remove, check_write, FsService, SUPERUSER};
pub use session::{Session, User, UserRegistry};
pub use tree::FsTree;

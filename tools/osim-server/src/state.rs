//! Shared engine state.
//!
//! Each engine sits behind its own lock; the two never share data, so a
//! filesystem request never waits on a scheduler request.

use std::num::NonZeroU64;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use osim_process::{NewProcess, Pid, ProcessResult, ProcessTable};
use osim_vfs::{bootstrap_filesystem, MemoryFs};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Demo processes: (PID, arrival, burst, owner).
pub const DEMO_PROCESSES: [(Pid, u64, u64, &str); 2] = [(1, 0, 5, "usuario1"), (2, 0, 1, "usuario2")];

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Process table and queues
    pub processes: Arc<RwLock<ProcessTable>>,
    /// Filesystem and session
    pub fs: Arc<RwLock<MemoryFs>>,
    /// Round Robin quantum
    pub quantum: NonZeroU64,
}

impl AppState {
    /// Build the engines from `config`: bootstrap the filesystem and
    /// optionally seed the demo processes.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let users = config.registry();
        let mut fs = MemoryFs::new(users.clone());
        bootstrap_filesystem(&mut fs, &users)?;

        let mut table = ProcessTable::new();
        if config.seed_demo {
            seed_demo(&mut table)?;
            info!(processes = table.len(), "demo processes loaded");
        }

        Ok(Self {
            processes: Arc::new(RwLock::new(table)),
            fs: Arc::new(RwLock::new(fs)),
            quantum: config.quantum,
        })
    }
}

/// Add [`DEMO_PROCESSES`] to `table`.
pub fn seed_demo(table: &mut ProcessTable) -> ProcessResult<()> {
    for (pid, arrival, burst, owner) in DEMO_PROCESSES {
        table.add(NewProcess::new(pid, arrival, burst, owner))?;
    }
    Ok(())
}

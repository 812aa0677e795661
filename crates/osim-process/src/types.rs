//! Core process types
//!
//! Pure data types shared by the process table and the scheduling algorithms.

use serde::{Deserialize, Serialize};

/// Process identifier (positive, unique across the table)
pub type Pid = u32;

/// Largest accepted arrival time or burst.
///
/// Bounds the simulated clock well below `u64::MAX` and the number of Round
/// Robin slices a single process can produce.
pub const MAX_TIME: u64 = 1_000_000;

/// Process state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Waiting in the ready queue
    #[serde(rename = "Listo")]
    Ready,
    /// Waiting in the blocked queue
    #[serde(rename = "Bloqueado")]
    Blocked,
    /// Currently on the simulated CPU
    #[serde(rename = "Ejecutando")]
    Running,
    /// Completed its burst
    #[serde(rename = "Terminado")]
    Finished,
}

impl ProcessState {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ProcessState::Ready => "Listo",
            ProcessState::Blocked => "Bloqueado",
            ProcessState::Running => "Ejecutando",
            ProcessState::Finished => "Terminado",
        }
    }
}

/// Process descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process ID
    pub pid: Pid,
    /// Logical arrival time
    pub arrival: u64,
    /// Total CPU time required
    pub burst: u64,
    /// Owning user name
    pub owner: String,
    /// Current state
    pub state: ProcessState,
}

/// Arguments for adding a process to the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProcess {
    /// Process ID
    pub pid: Pid,
    /// Logical arrival time
    pub arrival: u64,
    /// Total CPU time required (must be > 0)
    pub burst: u64,
    /// Owning user name
    pub owner: String,
}

impl NewProcess {
    /// Create a new process description.
    pub fn new(pid: Pid, arrival: u64, burst: u64, owner: impl Into<String>) -> Self {
        Self {
            pid,
            arrival,
            burst,
            owner: owner.into(),
        }
    }
}

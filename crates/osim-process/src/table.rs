//! Process table - the process set plus the ready and blocked queues
//!
//! The table is the single owner of process state. Queue transitions are the
//! only way a process changes state; the scheduling algorithms read a
//! snapshot through [`ProcessTable::participants`] and never write back.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProcessError, ProcessResult, QueueKind};
use crate::scheduling::Participant;
use crate::types::{NewProcess, Pid, Process, ProcessState, MAX_TIME};

/// Ordered PID contents of both queues, for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Ready queue, head first
    #[serde(rename = "cola_listos")]
    pub ready: Vec<Pid>,
    /// Blocked queue, head first
    #[serde(rename = "cola_bloqueados")]
    pub blocked: Vec<Pid>,
}

/// The process table.
#[derive(Clone, Debug, Default)]
pub struct ProcessTable {
    /// Processes in insertion order (never removed)
    pub(crate) processes: Vec<Process>,
    /// PID -> index into `processes`
    pub(crate) index: HashMap<Pid, usize>,
    /// Ready queue
    pub(crate) ready: VecDeque<Pid>,
    /// Blocked queue
    pub(crate) blocked: VecDeque<Pid>,
}

impl ProcessTable {
    /// Create a new empty process table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process and append it to the tail of the ready queue.
    pub fn add(&mut self, new: NewProcess) -> ProcessResult<&Process> {
        if new.pid == 0 {
            return Err(ProcessError::invalid("el PID debe ser positivo"));
        }
        if new.burst == 0 {
            return Err(ProcessError::invalid("la ráfaga de CPU debe ser mayor que 0"));
        }
        if new.arrival > MAX_TIME || new.burst > MAX_TIME {
            return Err(ProcessError::invalid(format!(
                "los tiempos no pueden superar {}",
                MAX_TIME
            )));
        }
        if self.index.contains_key(&new.pid) {
            return Err(ProcessError::DuplicatePid(new.pid));
        }

        let slot = self.processes.len();
        self.processes.push(Process {
            pid: new.pid,
            arrival: new.arrival,
            burst: new.burst,
            owner: new.owner,
            state: ProcessState::Ready,
        });
        self.index.insert(new.pid, slot);
        self.ready.push_back(new.pid);

        debug!(pid = new.pid, arrival = new.arrival, burst = new.burst, "process added");
        self.debug_check();
        Ok(&self.processes[slot])
    }

    /// Move the head of the ready queue to the tail of the blocked queue.
    pub fn block(&mut self) -> ProcessResult<Pid> {
        let pid = *self
            .ready
            .front()
            .ok_or(ProcessError::EmptyQueue(QueueKind::Ready))?;
        self.transfer(pid, QueueKind::Ready)
    }

    /// Move the head of the blocked queue to the tail of the ready queue.
    pub fn unblock(&mut self) -> ProcessResult<Pid> {
        let pid = *self
            .blocked
            .front()
            .ok_or(ProcessError::EmptyQueue(QueueKind::Blocked))?;
        self.transfer(pid, QueueKind::Blocked)
    }

    /// Move a specific ready process to the tail of the blocked queue.
    pub fn block_pid(&mut self, pid: Pid) -> ProcessResult<Pid> {
        self.transfer(pid, QueueKind::Ready)
    }

    /// Move a specific blocked process to the tail of the ready queue.
    pub fn unblock_pid(&mut self, pid: Pid) -> ProcessResult<Pid> {
        self.transfer(pid, QueueKind::Blocked)
    }

    /// Move `pid` out of `from` and onto the tail of the other queue.
    fn transfer(&mut self, pid: Pid, from: QueueKind) -> ProcessResult<Pid> {
        let slot = *self.index.get(&pid).ok_or(ProcessError::NotFound(pid))?;

        let (source, target, new_state) = match from {
            QueueKind::Ready => (&mut self.ready, &mut self.blocked, ProcessState::Blocked),
            QueueKind::Blocked => (&mut self.blocked, &mut self.ready, ProcessState::Ready),
        };

        let position = source
            .iter()
            .position(|p| *p == pid)
            .ok_or(ProcessError::NotInQueue { pid, queue: from })?;
        source.remove(position);
        target.push_back(pid);
        self.processes[slot].state = new_state;

        debug!(pid, state = new_state.name(), "process moved");
        self.debug_check();
        Ok(pid)
    }

    // ========================================================================
    // Read-only accessors
    // ========================================================================

    /// All known processes, in insertion order.
    pub fn list(&self) -> &[Process] {
        &self.processes
    }

    /// Look up a process by PID.
    pub fn get(&self, pid: Pid) -> ProcessResult<&Process> {
        self.index
            .get(&pid)
            .map(|slot| &self.processes[*slot])
            .ok_or(ProcessError::NotFound(pid))
    }

    /// Current queue contents.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            ready: self.ready.iter().copied().collect(),
            blocked: self.blocked.iter().copied().collect(),
        }
    }

    /// Timing data of every process in the ready queue, in queue order.
    pub fn participants(&self) -> Vec<Participant> {
        self.ready
            .iter()
            .filter_map(|pid| self.index.get(pid))
            .map(|slot| {
                let p = &self.processes[*slot];
                Participant {
                    pid: p.pid,
                    arrival: p.arrival,
                    burst: p.burst,
                }
            })
            .collect()
    }

    /// Ready queue, head first.
    pub fn ready_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.ready.iter().copied()
    }

    /// Blocked queue, head first.
    pub fn blocked_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.blocked.iter().copied()
    }

    /// Number of known processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Check if the table has no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    fn debug_check(&self) {
        debug_assert!(
            crate::invariants::check_all_invariants(self).is_empty(),
            "process table invariants violated"
        );
    }
}

//! OS Simulator - Process Engine
//!
//! This crate owns the simulated process table and the two process queues,
//! and provides the CPU scheduling algorithms that run over them.
//!
//! # Design Principles
//!
//! 1. **Explicit state**: All mutable state lives in one [`ProcessTable`]
//! 2. **Pure scheduling**: Algorithms consume a snapshot and never mutate the table
//! 3. **Deterministic**: Same ready queue always produces the same schedule
//! 4. **Logical time**: Time is an integer clock, never wall-clock
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ProcessTable                           │
//! │                                                             │
//! │   processes (insertion order)                               │
//! │                                                             │
//! │   ready:   [pid, pid, ...]  ──block──▶  blocked: [pid, ...] │
//! │            ▲                                     │          │
//! │            └──────────────unblock────────────────┘          │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ participants()
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       scheduling                            │
//! │                                                             │
//! │   fcfs  ·  sjf  ·  round_robin   ──▶  Schedule              │
//! │                                       - results             │
//! │                                       - timeline            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - `types` - Process identity and state
//! - `error` - Error type for process table operations
//! - `table` - The process table with its ready and blocked queues
//! - `invariants` - Runtime-checkable queue invariants
//! - `scheduling` - FCFS, SJF and Round Robin over a ready-queue snapshot

pub mod error;
pub mod invariants;
pub mod scheduling;
pub mod table;
pub mod types;

pub use error::{ProcessError, ProcessResult, QueueKind};
pub use invariants::{check_all_invariants, InvariantViolation};
pub use scheduling::{
    run, Algorithm, Participant, Schedule, ScheduleResult, ScheduleSummary, Slice,
    DEFAULT_QUANTUM,
};
pub use table::{ProcessTable, QueueSnapshot};
pub use types::{NewProcess, Pid, Process, ProcessState, MAX_TIME};

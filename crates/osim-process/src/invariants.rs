//! Runtime-checkable invariants of the process table
//!
//! Checked after every mutation in debug builds and exercised directly by
//! tests.
//!
//! # Invariants
//!
//! 1. **Known Members**: Every queued PID exists in the process table
//! 2. **Exclusive Membership**: A PID sits in at most one queue, at most once
//! 3. **State Agreement**: Ready/Blocked state matches queue membership
//! 4. **Index Consistency**: The PID index points at the matching process

use std::collections::HashSet;

use crate::table::ProcessTable;
use crate::types::{Pid, ProcessState};

/// An invariant violation with details
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant: &'static str,
    /// Description of what went wrong
    pub description: String,
}

/// Check all process table invariants.
///
/// Returns a list of violations (empty if all invariants hold).
pub fn check_all_invariants(table: &ProcessTable) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    violations.extend(check_known_members(table));
    violations.extend(check_exclusive_membership(table));
    violations.extend(check_state_agreement(table));
    violations.extend(check_index_consistency(table));

    violations
}

/// Invariant 1: queue membership is a subset of known PIDs
fn check_known_members(table: &ProcessTable) -> Vec<InvariantViolation> {
    table
        .ready_queue()
        .chain(table.blocked_queue())
        .filter(|pid| table.get(*pid).is_err())
        .map(|pid| InvariantViolation {
            invariant: "known_members",
            description: format!("Queued PID {} is not in the process table", pid),
        })
        .collect()
}

/// Invariant 2: no PID is queued twice, in the same or different queues
fn check_exclusive_membership(table: &ProcessTable) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<Pid> = HashSet::new();

    for pid in table.ready_queue().chain(table.blocked_queue()) {
        if !seen.insert(pid) {
            violations.push(InvariantViolation {
                invariant: "exclusive_membership",
                description: format!("PID {} is queued more than once", pid),
            });
        }
    }

    violations
}

/// Invariant 3: state agrees with the queue a process sits in
fn check_state_agreement(table: &ProcessTable) -> Vec<InvariantViolation> {
    let ready: HashSet<Pid> = table.ready_queue().collect();
    let blocked: HashSet<Pid> = table.blocked_queue().collect();
    let mut violations = Vec::new();

    for process in table.list() {
        let expected = match process.state {
            ProcessState::Ready => ready.contains(&process.pid),
            ProcessState::Blocked => blocked.contains(&process.pid),
            // Running/Finished processes are outside both queues
            ProcessState::Running | ProcessState::Finished => {
                !ready.contains(&process.pid) && !blocked.contains(&process.pid)
            }
        };
        if !expected {
            violations.push(InvariantViolation {
                invariant: "state_agreement",
                description: format!(
                    "Process {} is {} but queue membership disagrees",
                    process.pid,
                    process.state.name()
                ),
            });
        }
    }

    violations
}

/// Invariant 4: the PID index and the process list agree
fn check_index_consistency(table: &ProcessTable) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if table.index.len() != table.processes.len() {
        violations.push(InvariantViolation {
            invariant: "index_consistency",
            description: format!(
                "Index has {} entries for {} processes",
                table.index.len(),
                table.processes.len()
            ),
        });
    }

    for (pid, slot) in &table.index {
        match table.processes.get(*slot) {
            Some(process) if process.pid == *pid => {}
            _ => violations.push(InvariantViolation {
                invariant: "index_consistency",
                description: format!("Index entry for PID {} points at slot {}", pid, slot),
            }),
        }
    }

    violations
}

/// Assert all invariants hold (panic if not)
pub fn assert_invariants(table: &ProcessTable) {
    let violations = check_all_invariants(table);
    if let Some(v) = violations.first() {
        panic!("Invariant violated: {} ({})", v.invariant, v.description);
    }
}

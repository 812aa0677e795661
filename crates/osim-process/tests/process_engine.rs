//! Process Engine Integration Tests
//!
//! Drive the table and the algorithms together the way the server does.

use osim_process::{
    check_all_invariants, run, Algorithm, NewProcess, ProcessError, ProcessState, ProcessTable,
    QueueKind, DEFAULT_QUANTUM, MAX_TIME,
};
use pretty_assertions::assert_eq;

fn demo_table() -> ProcessTable {
    let mut table = ProcessTable::new();
    table.add(NewProcess::new(1, 0, 8, "usuario1")).unwrap();
    table.add(NewProcess::new(2, 1, 4, "usuario2")).unwrap();
    table.add(NewProcess::new(3, 2, 9, "root")).unwrap();
    table
}

/// Only ready processes take part in a run.
#[test]
fn test_blocked_processes_are_excluded_from_runs() {
    let mut table = demo_table();
    table.block().unwrap();

    let schedule = run(Algorithm::Fcfs, &table.participants());
    assert_eq!(schedule.completion_order(), vec![2, 3]);
    // Clock starts at the earliest participating arrival
    assert_eq!(schedule.result(2).unwrap().completion_time, 5);
}

/// Runs are pure: repeating them gives the same answer and leaves the table alone.
#[test]
fn test_runs_are_idempotent_and_do_not_mutate() {
    let table = demo_table();
    let before = table.snapshot();

    let first = run(Algorithm::Sjf, &table.participants());
    let second = run(Algorithm::Sjf, &table.participants());
    assert_eq!(first, second);

    assert_eq!(table.snapshot(), before);
    assert!(table.list().iter().all(|p| p.state == ProcessState::Ready));
}

/// A schedule computed from a snapshot is unaffected by later queue changes.
#[test]
fn test_schedule_is_detached_from_later_mutations() {
    let mut table = demo_table();
    let participants = table.participants();
    let schedule = run(
        Algorithm::RoundRobin {
            quantum: DEFAULT_QUANTUM,
        },
        &participants,
    );

    table.block().unwrap();
    table.add(NewProcess::new(4, 0, 1, "root")).unwrap();

    assert_eq!(schedule.results.len(), 3);
    assert_eq!(
        run(
            Algorithm::RoundRobin {
                quantum: DEFAULT_QUANTUM
            },
            &participants
        ),
        schedule
    );
}

/// Every algorithm produces one row per ready process.
#[test]
fn test_all_algorithms_cover_every_participant() {
    let table = demo_table();
    for name in ["fcfs", "sjf", "rr"] {
        let algorithm: Algorithm = name.parse().unwrap();
        let schedule = run(algorithm, &table.participants());
        let mut pids = schedule.completion_order();
        pids.sort_unstable();
        assert_eq!(pids, vec![1, 2, 3], "algorithm {}", name);
        assert_eq!(schedule.summary(algorithm).makespan, 21);
    }
}

/// Failed operations leave the table untouched.
#[test]
fn test_failures_are_atomic() {
    let mut table = demo_table();
    let before = table.snapshot();

    assert_eq!(
        table.add(NewProcess::new(2, 0, 1, "root")).unwrap_err(),
        ProcessError::DuplicatePid(2)
    );
    assert_eq!(
        table.unblock().unwrap_err(),
        ProcessError::EmptyQueue(QueueKind::Blocked)
    );
    assert!(table.unblock_pid(77).unwrap_err().is_not_found());
    assert!(table.get(77).unwrap_err().is_not_found());

    assert_eq!(table.snapshot(), before);
    assert!(check_all_invariants(&table).is_empty());
}

/// Oversized times never reach the schedulers.
#[test]
fn test_huge_bursts_are_rejected() {
    let mut table = ProcessTable::new();
    for pid in 1..=3 {
        let err = table
            .add(NewProcess::new(pid, 0, i64::MAX as u64, "root"))
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidArgument(_)));
    }
    table.add(NewProcess::new(4, MAX_TIME, MAX_TIME, "root")).unwrap();

    for name in ["fcfs", "sjf", "rr"] {
        let algorithm: Algorithm = name.parse().unwrap();
        let schedule = run(algorithm, &table.participants());
        assert_eq!(schedule.completion_order(), vec![4]);
        assert_eq!(schedule.summary(algorithm).makespan, 2 * MAX_TIME);
    }
}

//! First Come First Served.
//!
//! Participants run to completion in arrival order (ties by PID). The clock
//! jumps forward over idle gaps.

use super::{arrival_order, start_clock, Participant, Schedule, ScheduleResult, Slice};

/// Compute the FCFS schedule.
pub fn schedule(participants: &[Participant]) -> Schedule {
    let mut clock = start_clock(participants);
    let mut out = Schedule::default();

    for p in arrival_order(participants) {
        clock = clock.max(p.arrival);
        let start = clock;
        clock = clock.saturating_add(p.burst);

        out.timeline.push(Slice {
            pid: p.pid,
            start,
            end: clock,
        });
        out.results.push(ScheduleResult::completed(&p, clock));
    }

    out
}

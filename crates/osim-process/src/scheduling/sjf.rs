//! Shortest Job First (non-preemptive).
//!
//! At each completion boundary the shortest burst among the arrived
//! participants is chosen (ties by arrival, then PID). With nothing arrived
//! the clock jumps to the next arrival.

use super::{arrival_order, start_clock, Participant, Schedule, ScheduleResult, Slice};

/// Compute the SJF schedule.
pub fn schedule(participants: &[Participant]) -> Schedule {
    let mut clock = start_clock(participants);
    let mut pending = arrival_order(participants);
    let mut out = Schedule::default();

    while !pending.is_empty() {
        let pick = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival <= clock)
            .min_by_key(|(_, p)| (p.burst, p.arrival, p.pid))
            .map(|(i, _)| i);

        let Some(index) = pick else {
            // `pending` is in arrival order, so the head arrives next
            clock = pending[0].arrival;
            continue;
        };

        let p = pending.remove(index);
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

//! Round Robin with a fixed quantum.
//!
//! Participants enter the rotation in arrival order (ties by PID) exactly when
//! the clock reaches their arrival. A process whose slice ends without
//! finishing goes to the tail *after* everything that arrived during that
//! slice.

use std::collections::VecDeque;
use std::num::NonZeroU64;

use super::{arrival_order, start_clock, Participant, Schedule, ScheduleResult, Slice};

/// A participant in the rotation with its remaining burst.
#[derive(Clone, Copy, Debug)]
struct Turn {
    participant: Participant,
    remaining: u64,
}

/// Compute the Round Robin schedule.
pub fn schedule(participants: &[Participant], quantum: NonZeroU64) -> Schedule {
    let mut clock = start_clock(participants);
    let mut incoming: VecDeque<Participant> = arrival_order(participants).into();
    let mut rotation: VecDeque<Turn> = VecDeque::new();
    let mut out = Schedule::default();

    admit(&mut incoming, &mut rotation, clock);

    loop {
        let Some(turn) = rotation.pop_front() else {
            match incoming.front() {
                Some(next) => {
                    clock = next.arrival;
                    admit(&mut incoming, &mut rotation, clock);
                    continue;
                }
                None => break,
            }
        };

        let ran = turn.remaining.min(quantum.get());
        let start = clock;
        clock = clock.saturating_add(ran);
        out.timeline.push(Slice {
            pid: turn.participant.pid,
            start,
            end: clock,
        });

        admit(&mut incoming, &mut rotation, clock);

        let remaining = turn.remaining - ran;
        if remaining > 0 {
            rotation.push_back(Turn { remaining, ..turn });
        } else {
            out.results
                .push(ScheduleResult::completed(&turn.participant, clock));
        }
    }

    out
}

/// Move every participant with `arrival <= clock` onto the rotation tail.
fn admit(incoming: &mut VecDeque<Participant>, rotation: &mut VecDeque<Turn>, clock: u64) {
    while let Some(p) = incoming.front() {
        if p.arrival > clock {
            break;
        }
        let participant = *p;
        incoming.pop_front();
        rotation.push_back(Turn {
            participant,
            remaining: participant.burst,
        });
    }
}

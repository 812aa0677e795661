//! CPU scheduling over a ready-queue snapshot
//!
//! Every algorithm is a pure function from a slice of [`Participant`]s to a
//! [`Schedule`]. The simulated clock starts at the smallest arrival time among
//! the participants and only ever moves forward in whole time units.
//!
//! - [`fcfs`] - First Come First Served, non-preemptive
//! - [`sjf`] - Shortest Job First, non-preemptive
//! - [`round_robin`] - fixed quantum rotation with arrival-time admission

pub mod fcfs;
pub mod round_robin;
pub mod sjf;

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProcessError;
use crate::types::Pid;

/// Default Round Robin quantum.
pub const DEFAULT_QUANTUM: NonZeroU64 = match NonZeroU64::new(2) {
    Some(q) => q,
    None => unreachable!(),
};

/// Timing input of one process taking part in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participant {
    /// Process ID
    pub pid: Pid,
    /// Logical arrival time
    pub arrival: u64,
    /// Total CPU time required
    pub burst: u64,
}

impl Participant {
    /// Create a participant.
    pub fn new(pid: Pid, arrival: u64, burst: u64) -> Self {
        Self {
            pid,
            arrival,
            burst,
        }
    }
}

/// Per-process timing result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Process ID
    pub pid: Pid,
    /// Logical arrival time
    #[serde(rename = "tiempo_llegada")]
    pub arrival: u64,
    /// Total CPU time required
    #[serde(rename = "rafaga_cpu")]
    pub burst: u64,
    /// Turnaround minus burst
    #[serde(rename = "tiempo_espera")]
    pub wait_time: u64,
    /// Clock value when the last unit of burst finished
    #[serde(rename = "tiempo_finalizacion")]
    pub completion_time: u64,
    /// Completion minus arrival
    #[serde(rename = "tiempo_retorno")]
    pub turnaround_time: u64,
}

impl ScheduleResult {
    /// Derive the result row of a participant that completed at `completion`.
    pub fn completed(p: &Participant, completion: u64) -> Self {
        let turnaround = completion.saturating_sub(p.arrival);
        Self {
            pid: p.pid,
            arrival: p.arrival,
            burst: p.burst,
            wait_time: turnaround.saturating_sub(p.burst),
            completion_time: completion,
            turnaround_time: turnaround,
        }
    }
}

/// One contiguous stretch of CPU time given to a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Process that ran
    pub pid: Pid,
    /// Clock value when it started (inclusive)
    #[serde(rename = "inicio")]
    pub start: u64,
    /// Clock value when it stopped (exclusive)
    #[serde(rename = "fin")]
    pub end: u64,
}

/// Output of a scheduling run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// One row per participant, in completion order
    pub results: Vec<ScheduleResult>,
    /// Execution slices, in clock order
    pub timeline: Vec<Slice>,
}

impl Schedule {
    /// Result row for a PID, if it took part.
    pub fn result(&self, pid: Pid) -> Option<&ScheduleResult> {
        self.results.iter().find(|r| r.pid == pid)
    }

    /// Completion order of the run.
    pub fn completion_order(&self) -> Vec<Pid> {
        self.results.iter().map(|r| r.pid).collect()
    }

    /// Aggregate metrics of the run.
    pub fn summary(&self, algorithm: Algorithm) -> ScheduleSummary {
        let count = self.results.len();
        let average = |total: u64| {
            if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            }
        };

        ScheduleSummary {
            algorithm: algorithm.to_string(),
            processes: count,
            average_wait: average(total(self.results.iter().map(|r| r.wait_time))),
            average_turnaround: average(total(self.results.iter().map(|r| r.turnaround_time))),
            makespan: self.timeline.last().map_or(0, |s| s.end),
        }
    }
}

fn total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

/// Aggregate metrics of a scheduling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Algorithm name
    #[serde(rename = "algoritmo")]
    pub algorithm: String,
    /// Number of participants
    #[serde(rename = "procesos")]
    pub processes: usize,
    /// Mean waiting time
    #[serde(rename = "espera_promedio")]
    pub average_wait: f64,
    /// Mean turnaround time
    #[serde(rename = "retorno_promedio")]
    pub average_turnaround: f64,
    /// Clock value when the last process finished
    #[serde(rename = "tiempo_total")]
    pub makespan: u64,
}

/// Scheduling algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// First Come First Served
    Fcfs,
    /// Shortest Job First (non-preemptive)
    Sjf,
    /// Round Robin with a fixed quantum
    RoundRobin {
        /// Time units per turn
        quantum: NonZeroU64,
    },
}

impl Algorithm {
    /// Parse an algorithm name, using `quantum` for Round Robin.
    pub fn parse(name: &str, quantum: NonZeroU64) -> Result<Self, ProcessError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" | "round_robin" => Ok(Algorithm::RoundRobin { quantum }),
            other => Err(ProcessError::invalid(format!(
                "algoritmo desconocido '{}' (use fcfs, sjf o rr)",
                other
            ))),
        }
    }

    /// Short name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::RoundRobin { .. } => "rr",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::parse(s, DEFAULT_QUANTUM)
    }
}

/// Run `algorithm` over `participants`.
pub fn run(algorithm: Algorithm, participants: &[Participant]) -> Schedule {
    let schedule = match algorithm {
        Algorithm::Fcfs => fcfs::schedule(participants),
        Algorithm::Sjf => sjf::schedule(participants),
        Algorithm::RoundRobin { quantum } => round_robin::schedule(participants, quantum),
    };
    debug!(
        algorithm = algorithm.name(),
        processes = schedule.results.len(),
        slices = schedule.timeline.len(),
        "schedule computed"
    );
    schedule
}

/// Participants ordered by arrival, ties by PID.
pub(crate) fn arrival_order(participants: &[Participant]) -> Vec<Participant> {
    let mut ordered = participants.to_vec();
    ordered.sort_by_key(|p| (p.arrival, p.pid));
    ordered
}

/// Clock start: the earliest arrival, or 0 with no participants.
pub(crate) fn start_clock(participants: &[Participant]) -> u64 {
    participants.iter().map(|p| p.arrival).min().unwrap_or(0)
}

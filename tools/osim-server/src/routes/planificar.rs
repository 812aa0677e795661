//! `/planificar` - run a scheduling algorithm over the ready queue.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use osim_process::{run, Algorithm, Schedule, ScheduleResult, ScheduleSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// Routes under `/planificar`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{algo}", post(run_algorithm))
        .route("/{algo}/resumen", get(summary))
}

/// Parse the algorithm and run it on a snapshot of the ready queue.
///
/// The read lock is released before the algorithm runs.
fn schedule(
    state: &AppState,
    name: Result<Path<String>, PathRejection>,
) -> Result<(Algorithm, Schedule), ApiError> {
    let Path(name) = name?;
    let algorithm = Algorithm::parse(&name, state.quantum)?;
    let participants = state.processes.read().participants();
    Ok((algorithm, run(algorithm, &participants)))
}

async fn run_algorithm(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<ScheduleResult>>, ApiError> {
    let (_, schedule) = schedule(&state, name)?;
    Ok(Json(schedule.results))
}

async fn summary(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<ScheduleSummary>, ApiError> {
    let (algorithm, schedule) = schedule(&state, name)?;
    Ok(Json(schedule.summary(algorithm)))
}

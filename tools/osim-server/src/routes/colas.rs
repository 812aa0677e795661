//! `/colas` - process table and queue transitions.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use osim_process::{Pid, ProcessTable, QueueSnapshot};

use crate::api::{AddProcessRequest, PidQuery, ProcessMoved, ProcessRow};
use crate::error::ApiError;
use crate::state::AppState;

/// Routes under `/colas`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/procesos", get(list_processes))
        .route("/mostrar", get(show_queues))
        .route("/agregar", post(add_process))
        .route("/bloquear", post(block))
        .route("/desbloquear", post(unblock))
}

async fn list_processes(State(state): State<AppState>) -> Json<Vec<ProcessRow>> {
    let table = state.processes.read();
    Json(table.list().iter().map(ProcessRow::from).collect())
}

async fn show_queues(State(state): State<AppState>) -> Json<QueueSnapshot> {
    Json(state.processes.read().snapshot())
}

async fn add_process(
    State(state): State<AppState>,
    payload: Result<Json<AddProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessMoved>, ApiError> {
    let Json(request) = payload?;
    let new = request.into_new_process()?;

    let mut table = state.processes.write();
    let process = table.add(new)?;
    Ok(Json(ProcessMoved::new(
        format!("Proceso {} agregado a la cola de listos", process.pid),
        process,
    )))
}

async fn block(
    State(state): State<AppState>,
    query: Result<Query<PidQuery>, QueryRejection>,
) -> Result<Json<ProcessMoved>, ApiError> {
    let Query(query) = query?;
    let target = query.pid()?;

    let mut table = state.processes.write();
    let pid = match target {
        Some(pid) => table.block_pid(pid)?,
        None => table.block()?,
    };
    moved(&table, pid, "bloqueado")
}

async fn unblock(
    State(state): State<AppState>,
    query: Result<Query<PidQuery>, QueryRejection>,
) -> Result<Json<ProcessMoved>, ApiError> {
    let Query(query) = query?;
    let target = query.pid()?;

    let mut table = state.processes.write();
    let pid = match target {
        Some(pid) => table.unblock_pid(pid)?,
        None => table.unblock()?,
    };
    moved(&table, pid, "desbloqueado")
}

fn moved(table: &ProcessTable, pid: Pid, verb: &str) -> Result<Json<ProcessMoved>, ApiError> {
    let process = table.get(pid)?;
    Ok(Json(ProcessMoved::new(
        format!("Proceso {} {}", pid, verb),
        process,
    )))
}

//! `/fs` - the virtual filesystem shell.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use osim_vfs::{DirEntry, FsService};

use crate::api::{
    parse_mode, CdResponse, CreateQuery, CurrentUserResponse, ListQuery, ListResponse, Message,
    ModeQuery, OwnerQuery, PathQuery, PwdResponse, ReadResponse, UserQuery, UsersResponse,
    WriteQuery,
};
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Routes under `/fs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pwd", get(pwd))
        .route("/users", get(users))
        .route("/current-user", get(current_user))
        .route("/su", post(switch_user))
        .route("/ls", get(list))
        .route("/mkdir", post(make_directory))
        .route("/create", post(create_file))
        .route("/read", get(read_file))
        .route("/write", post(write_file))
        .route("/rm", post(remove))
        .route("/cd", post(change_directory))
        .route("/stat", get(stat))
        .route("/chmod", post(chmod))
        .route("/chown", post(chown))
}

// ============================================================================
// Session
// ============================================================================

async fn pwd(State(state): State<AppState>) -> Json<PwdResponse> {
    Json(PwdResponse {
        pwd: state.fs.read().pwd(),
    })
}

async fn users(State(state): State<AppState>) -> Json<UsersResponse> {
    Json(UsersResponse {
        users: state.fs.read().users(),
    })
}

async fn current_user(State(state): State<AppState>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        username: String::from(state.fs.read().current_user()),
    })
}

async fn switch_user(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    state.fs.write().switch_user(&query.username)?;
    Ok(Json(Message::new(format!("Usuario actual: {}", query.username))))
}

async fn change_directory(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> ApiResult<CdResponse> {
    let Query(query) = query?;
    let pwd = state.fs.write().change_directory(&query.ruta)?;
    Ok(Json(CdResponse {
        mensaje: format!("Directorio actual: {}", pwd),
        pwd,
    }))
}

// ============================================================================
// Directories
// ============================================================================

async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<ListResponse> {
    let Query(query) = query?;
    let ruta = query.ruta.as_deref().unwrap_or(".");
    let contenido = state.fs.read().list(ruta)?;
    Ok(Json(ListResponse { contenido }))
}

async fn make_directory(
    State(state): State<AppState>,
    query: Result<Query<ModeQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let mode = parse_mode(query.permisos.as_deref())?;
    state.fs.write().make_directory(&query.ruta, mode)?;
    Ok(Json(Message::new(format!("Directorio '{}' creado", query.ruta))))
}

async fn remove(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    state.fs.write().remove(&query.ruta)?;
    Ok(Json(Message::new(format!("'{}' eliminado", query.ruta))))
}

// ============================================================================
// Files
// ============================================================================

async fn create_file(
    State(state): State<AppState>,
    query: Result<Query<CreateQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let mode = parse_mode(query.permisos.as_deref())?;
    state
        .fs
        .write()
        .create_file(&query.ruta, query.contenido.as_bytes(), mode)?;
    Ok(Json(Message::new(format!("Archivo '{}' creado", query.ruta))))
}

async fn read_file(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> ApiResult<ReadResponse> {
    let Query(query) = query?;
    let content = state.fs.read().read_file(&query.ruta)?;
    Ok(Json(ReadResponse {
        contenido: String::from_utf8_lossy(&content).into_owned(),
    }))
}

async fn write_file(
    State(state): State<AppState>,
    query: Result<Query<WriteQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    state
        .fs
        .write()
        .write_file(&query.ruta, query.texto.as_bytes())?;
    Ok(Json(Message::new(format!("Archivo '{}' actualizado", query.ruta))))
}

// ============================================================================
// Metadata
// ============================================================================

async fn stat(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> ApiResult<DirEntry> {
    let Query(query) = query?;
    Ok(Json(state.fs.read().stat(&query.ruta)?))
}

async fn chmod(
    State(state): State<AppState>,
    query: Result<Query<ModeQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    let mode = parse_mode(query.permisos.as_deref())?
        .ok_or_else(|| ApiError::invalid("faltan los permisos"))?;
    state.fs.write().chmod(&query.ruta, mode)?;
    Ok(Json(Message::new(format!(
        "Permisos de '{}' cambiados a {}",
        query.ruta, mode
    ))))
}

async fn chown(
    State(state): State<AppState>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> ApiResult<Message> {
    let Query(query) = query?;
    state.fs.write().chown(&query.ruta, &query.username)?;
    Ok(Json(Message::new(format!(
        "Propietario de '{}' cambiado a {}",
        query.ruta, query.username
    ))))
}

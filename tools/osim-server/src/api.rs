//! Wire types for the HTTP API.
//!
//! Field names follow the front end's contract; numbers arrive as signed
//! integers and are range-checked here before any engine call.

use serde::{Deserialize, Serialize};

use osim_process::{NewProcess, Pid, Process, ProcessState, MAX_TIME};
use osim_vfs::{DirEntry, FileMode};

use crate::error::ApiError;

// ============================================================================
// Common
// ============================================================================

/// Success body for mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable result
    pub mensaje: String,
}

impl Message {
    /// Create a new message body.
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

// ============================================================================
// Process queues
// ============================================================================

/// Body of `POST /colas/agregar`.
#[derive(Clone, Debug, Deserialize)]
pub struct AddProcessRequest {
    /// Process ID
    #[serde(rename = "PID", alias = "pid")]
    pub pid: i64,
    /// Arrival time
    #[serde(alias = "tiempoLlegada")]
    pub tiempo_llegada: i64,
    /// CPU burst
    #[serde(alias = "rafaga_CPU")]
    pub rafaga_cpu: i64,
    /// Owning user
    pub usuario: String,
}

impl AddProcessRequest {
    /// Validate ranges and convert into an engine request.
    pub fn into_new_process(self) -> Result<NewProcess, ApiError> {
        let pid = Pid::try_from(self.pid)
            .ok()
            .filter(|pid| *pid > 0)
            .ok_or_else(|| ApiError::invalid(format!("PID {} fuera de rango", self.pid)))?;
        let arrival = u64::try_from(self.tiempo_llegada).map_err(|_| {
            ApiError::invalid(format!(
                "el tiempo de llegada no puede ser negativo ({})",
                self.tiempo_llegada
            ))
        })?;
        let burst = u64::try_from(self.rafaga_cpu)
            .ok()
            .filter(|burst| *burst > 0)
            .ok_or_else(|| {
                ApiError::invalid(format!(
                    "la ráfaga de CPU debe ser mayor que 0 ({})",
                    self.rafaga_cpu
                ))
            })?;

        if arrival > MAX_TIME || burst > MAX_TIME {
            return Err(ApiError::invalid(format!(
                "los tiempos no pueden superar {}",
                MAX_TIME
            )));
        }

        Ok(NewProcess::new(pid, arrival, burst, self.usuario))
    }
}

/// Optional `?pid=` on block/unblock.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PidQuery {
    /// Process to move instead of the queue head
    pub pid: Option<i64>,
}

impl PidQuery {
    /// The addressed PID, if any.
    pub fn pid(&self) -> Result<Option<Pid>, ApiError> {
        self.pid
            .map(|raw| {
                Pid::try_from(raw)
                    .ok()
                    .filter(|pid| *pid > 0)
                    .ok_or_else(|| ApiError::invalid(format!("PID {} fuera de rango", raw)))
            })
            .transpose()
    }
}

/// One row of `GET /colas/procesos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    /// Process ID
    #[serde(rename = "PID")]
    pub pid: Pid,
    /// Current state
    #[serde(rename = "Estado")]
    pub state: ProcessState,
}

impl From<&Process> for ProcessRow {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            state: process.state,
        }
    }
}

/// Result of a queue mutation: the message plus the moved process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMoved {
    /// Human-readable result
    pub mensaje: String,
    /// Process ID
    #[serde(rename = "PID")]
    pub pid: Pid,
    /// State after the move
    #[serde(rename = "Estado")]
    pub state: ProcessState,
}

impl ProcessMoved {
    /// Describe `process` after a successful mutation.
    pub fn new(mensaje: impl Into<String>, process: &Process) -> Self {
        Self {
            mensaje: mensaje.into(),
            pid: process.pid,
            state: process.state,
        }
    }
}

// ============================================================================
// Filesystem
// ============================================================================

/// `?ruta=` for operations that need a path.
#[derive(Clone, Debug, Deserialize)]
pub struct PathQuery {
    /// Target path
    pub ruta: String,
}

/// `?ruta=` for `ls`, defaulting to the current directory.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Directory to list
    pub ruta: Option<String>,
}

/// `?ruta=&permisos=` for `mkdir` and `chmod`.
#[derive(Clone, Debug, Deserialize)]
pub struct ModeQuery {
    /// Target path
    pub ruta: String,
    /// Octal mode string
    pub permisos: Option<String>,
}

/// `?ruta=&contenido=&permisos=` for `create`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateQuery {
    /// Target path
    pub ruta: String,
    /// Initial content
    #[serde(default)]
    pub contenido: String,
    /// Octal mode string
    pub permisos: Option<String>,
}

/// `?ruta=&texto=` for `write`.
#[derive(Clone, Debug, Deserialize)]
pub struct WriteQuery {
    /// Target path
    pub ruta: String,
    /// New content
    #[serde(default)]
    pub texto: String,
}

/// `?username=` for `su`.
#[derive(Clone, Debug, Deserialize)]
pub struct UserQuery {
    /// User name
    pub username: String,
}

/// `?ruta=&username=` for `chown`.
#[derive(Clone, Debug, Deserialize)]
pub struct OwnerQuery {
    /// Target path
    pub ruta: String,
    /// New owner
    pub username: String,
}

/// Parse an optional mode string; missing or blank means "use the default".
pub fn parse_mode(permisos: Option<&str>) -> Result<Option<FileMode>, ApiError> {
    match permisos.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(raw.parse::<FileMode>()?)),
    }
}

/// `GET /fs/pwd`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwdResponse {
    /// Current directory
    pub pwd: String,
}

/// `GET /fs/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Configured user names
    pub users: Vec<String>,
}

/// `GET /fs/current-user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// Active user
    pub username: String,
}

/// `GET /fs/ls`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Directory entries, sorted by name
    pub contenido: Vec<DirEntry>,
}

/// `GET /fs/read`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResponse {
    /// File content (invalid UTF-8 is replaced)
    pub contenido: String,
}

/// `POST /fs/cd`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdResponse {
    /// Human-readable result
    pub mensaje: String,
    /// New current directory
    pub pwd: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pid: i64, arrival: i64, burst: i64) -> AddProcessRequest {
        AddProcessRequest {
            pid,
            tiempo_llegada: arrival,
            rafaga_cpu: burst,
            usuario: String::from("usuario1"),
        }
    }

    #[test]
    fn test_add_request_validation() {
        let new = request(3, 0, 4).into_new_process().unwrap();
        assert_eq!(new, NewProcess::new(3, 0, 4, "usuario1"));

        for bad in [request(0, 0, 1), request(-1, 0, 1), request(1, -2, 1), request(1, 0, 0), request(1, 0, -5)] {
            assert_eq!(bad.into_new_process().unwrap_err().kind(), "invalid_argument");
        }
        assert!(request(i64::from(u32::MAX) + 1, 0, 1).into_new_process().is_err());
        let limit = MAX_TIME as i64;
        assert!(request(1, limit, limit).into_new_process().is_ok());
        for bad in [request(1, 0, i64::MAX), request(1, i64::MAX, 1), request(1, limit + 1, 1), request(1, 0, limit + 1)] {
            assert_eq!(bad.into_new_process().unwrap_err().kind(), "invalid_argument");
        }
    }

    #[test]
    fn test_add_request_aliases() {
        let json = r#"{"pid": 7, "tiempoLlegada": 1, "rafaga_CPU": 2, "usuario": "root"}"#;
        let parsed: AddProcessRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.pid, 7);
        assert_eq!(parsed.rafaga_cpu, 2);
    }

    #[test]
    fn test_pid_query() {
        assert_eq!(PidQuery::default().pid().unwrap(), None);
        assert_eq!(PidQuery { pid: Some(4) }.pid().unwrap(), Some(4));
        assert!(PidQuery { pid: Some(0) }.pid().is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(None).unwrap(), None);
        assert_eq!(parse_mode(Some(" ")).unwrap(), None);
        assert_eq!(parse_mode(Some("700")).unwrap(), Some(FileMode::from_octal(0o700)));
        assert_eq!(parse_mode(Some("9x")).unwrap_err().kind(), "invalid_argument");
    }

    #[test]
    fn test_process_row_wire_names() {
        let row = ProcessRow {
            pid: 2,
            state: ProcessState::Blocked,
        };
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json, serde_json::json!({"PID": 2, "Estado": "Bloqueado"}));
    }
}

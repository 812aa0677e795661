//! Error types for the process engine.

use thiserror::Error;

use crate::types::Pid;

/// Result type for process engine operations
pub type ProcessResult<T> = Result<T, ProcessError>;

/// The two process queues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueKind {
    /// Ready queue
    Ready,
    /// Blocked queue
    Blocked,
}

impl QueueKind {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            QueueKind::Ready => "listos",
            QueueKind::Blocked => "bloqueados",
        }
    }
}

/// Errors from process table operations.
///
/// Every variant is a precondition failure; the table is left unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// Malformed argument (zero PID, zero burst, ...)
    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),

    /// PID already present in the table
    #[error("El PID {0} ya existe")]
    DuplicatePid(Pid),

    /// Queue has no process to move
    #[error("No hay procesos en la cola de {}", .0.name())]
    EmptyQueue(QueueKind),

    /// PID was never added
    #[error("El proceso {0} no existe")]
    NotFound(Pid),

    /// PID exists but is not in the expected queue
    #[error("El proceso {pid} no está en la cola de {}", .queue.name())]
    NotInQueue {
        /// Process that was addressed
        pid: Pid,
        /// Queue it was expected in
        queue: QueueKind,
    },
}

impl ProcessError {
    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::InvalidArgument(_) => "invalid_argument",
            ProcessError::DuplicatePid(_) => "duplicate_pid",
            ProcessError::EmptyQueue(_) => "empty_queue",
            ProcessError::NotFound(_) => "not_found",
            ProcessError::NotInQueue { .. } => "not_in_queue",
        }
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::NotFound(_))
    }
}

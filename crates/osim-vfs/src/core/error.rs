//! Error types for the VFS layer.

use thiserror::Error;

/// Result type for VFS operations
pub type FsResult<T> = Result<T, FsError>;

/// Errors from VFS operations.
///
/// Every variant is a precondition failure; the tree and the session are
/// left unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FsError {
    /// Malformed input (bad mode string, bad name)
    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),

    /// User is not in the configured user set
    #[error("El usuario '{0}' no existe")]
    UnknownUser(String),

    /// Path not found
    #[error("No existe: {0}")]
    NotFound(String),

    /// Expected a directory
    #[error("No es un directorio: {0}")]
    NotADirectory(String),

    /// Expected a file
    #[error("No es un archivo: {0}")]
    NotAFile(String),

    /// Sibling with the same name exists
    #[error("Ya existe: {0}")]
    AlreadyExists(String),

    /// Current user lacks the required permission
    #[error("Permiso denegado: se requiere {required} sobre {path}")]
    PermissionDenied {
        /// Path that was denied
        path: String,
        /// Required permission (lectura, escritura, ejecución)
        required: &'static str,
    },
}

impl FsError {
    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a permission denied error.
    pub fn denied(path: impl Into<String>, required: &'static str) -> Self {
        Self::PermissionDenied {
            path: path.into(),
            required,
        }
    }

    /// Stable machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            FsError::InvalidArgument(_) => "invalid_argument",
            FsError::UnknownUser(_) => "unknown_user",
            FsError::NotFound(_) => "not_found",
            FsError::NotADirectory(_) => "not_a_directory",
            FsError::NotAFile(_) => "not_a_file",
            FsError::AlreadyExists(_) => "already_exists",
            FsError::PermissionDenied { .. } => "permission_denied",
        }
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    /// Check if this is a permission error.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, FsError::PermissionDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let err = FsError::denied("/home/usuario1", "escritura");
        match &err {
            FsError::PermissionDenied { path, required } => {
                assert_eq!(path, "/home/usuario1");
                assert_eq!(*required, "escritura");
            }
            _ => panic!("Expected PermissionDenied"),
        }
        assert_eq!(
            err.to_string(),
            "Permiso denegado: se requiere escritura sobre /home/usuario1"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(FsError::NotFound(String::from("/x")).is_not_found());
        assert!(!FsError::denied("/x", "lectura").is_not_found());
    }

    #[test]
    fn test_is_permission_denied() {
        assert!(FsError::denied("/x", "lectura").is_permission_denied());
        assert!(!FsError::AlreadyExists(String::from("/x")).is_permission_denied());
        assert_eq!(FsError::denied("/x", "lectura").kind(), "permission_denied");
    }
}

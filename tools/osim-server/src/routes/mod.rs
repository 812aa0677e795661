//! HTTP route handlers, one module per API prefix.

pub mod colas;
pub mod fs;
pub mod planificar;

use axum::Json;

use crate::api::Message;

/// `GET /` health check.
pub async fn home() -> Json<Message> {
    Json(Message::new("Servidor del simulador funcionando correctamente"))
}

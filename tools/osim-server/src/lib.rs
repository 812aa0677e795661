//! OS Simulator - HTTP API
//!
//! Exposes the process engine and the virtual filesystem to the web front
//! end as a JSON-over-HTTP service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      axum Router                             │
//! │   TraceLayer · CorsLayer                                     │
//! │                                                              │
//! │   /colas/*        /planificar/*           /fs/*              │
//! └──────┬──────────────────┬─────────────────────┬──────────────┘
//!        │                  │                     │
//!        ▼                  ▼                     ▼
//! ┌─────────────────────────────────┐   ┌────────────────────────┐
//! │ RwLock<ProcessTable>            │   │ RwLock<MemoryFs>       │
//! │  queues ──participants()──▶ run │   │  tree · users · session│
//! └─────────────────────────────────┘   └────────────────────────┘
//! ```
//!
//! Handlers take the lock, call one engine operation and release the lock
//! before the response is built; no lock is held across an `.await`.

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .nest("/colas", routes::colas::router())
        .nest("/planificar", routes::planificar::router())
        .nest("/fs", routes::fs::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

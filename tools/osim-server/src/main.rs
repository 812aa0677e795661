//! OS Simulator API server
//!
//! Serves the process scheduler and the virtual filesystem over HTTP for
//! the web front end.
//!
//! # Usage
//!
//! ```bash
//! # Default: http://127.0.0.1:8000
//! osim-server
//!
//! # Listen everywhere, quantum 3, demo processes loaded
//! osim-server --bind 0.0.0.0 --quantum 3 --seed-demo -v
//! ```

use std::net::IpAddr;
use std::num::NonZeroU64;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use osim_process::DEFAULT_QUANTUM;
use osim_server::{router, AppState, ServerConfig};

/// OS Simulator - process scheduling and filesystem API
#[derive(Parser)]
#[command(name = "osim-server")]
#[command(version)]
#[command(about = "HTTP API for the OS simulator", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Listen address
    #[arg(long, env = "OSIM_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = osim_server::config::DEFAULT_PORT)]
    port: u16,

    /// Round Robin quantum
    #[arg(
        short,
        long,
        env = "OSIM_QUANTUM",
        default_value_t = 2,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    quantum: u64,

    /// Users (comma-separated; root is always present)
    #[arg(
        long,
        env = "OSIM_USERS",
        value_delimiter = ',',
        default_value = "root,usuario1,usuario2"
    )]
    users: Vec<String>,

    /// Pre-load the demo processes
    #[arg(long)]
    seed_demo: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            port: self.port,
            quantum: NonZeroU64::new(self.quantum).unwrap_or(DEFAULT_QUANTUM),
            users: self.users,
            seed_demo: self.seed_demo,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let config = cli.into_config();
    let state = AppState::new(&config)?;
    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("╔═══════════════════════════════════════════════════╗");
    println!("║               OS Simulator API Server             ║");
    println!("╠═══════════════════════════════════════════════════╣");
    println!("║  URL: http://{:<37}║", addr);
    println!("║  Press Ctrl+C to stop                             ║");
    println!("╚═══════════════════════════════════════════════════╝");
    println!();

    info!(
        %addr,
        quantum = config.quantum.get(),
        users = ?config.registry().names(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

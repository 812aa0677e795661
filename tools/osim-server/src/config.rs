//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU64;

use osim_process::DEFAULT_QUANTUM;
use osim_vfs::UserRegistry;

/// Default listen port (the port the web front end calls).
pub const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration of the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address
    pub bind: IpAddr,
    /// Listen port
    pub port: u16,
    /// Round Robin quantum
    pub quantum: NonZeroU64,
    /// Configured user names (`root` is always added)
    pub users: Vec<String>,
    /// Pre-load the demo processes
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            quantum: DEFAULT_QUANTUM,
            users: ["root", "usuario1", "usuario2"]
                .into_iter()
                .map(String::from)
                .collect(),
            seed_demo: false,
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// User registry built from the configured names.
    pub fn registry(&self) -> UserRegistry {
        UserRegistry::from_names(&self.users)
    }
}

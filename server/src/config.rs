//! Command-line and environment configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Directory served for `/` and any path no API route claims.
pub const STATIC_DIR: &str = "./static";

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "JSON CRUD service for todo items backed by SQLite")]
pub struct Config {
    /// SQLite database file, created if missing.
    #[arg(long, env = "TODO_DATABASE", default_value = "./todos.db")]
    pub database: PathBuf,

    /// TCP port to listen on (all interfaces).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

/// Default HTTP bind address
pub const BIND_ADDRESS_DEFAULT: &str = "0.0.0.0:24110";

/// Default SQLite database
pub const DATABASE_URL_DEFAULT: &str = "sqlite://editorial.db?mode=rwc";

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Backend {
    /// Records live in process memory and vanish on exit.
    Memory,
    /// Records live in a SQLite database.
    Sqlite,
}

/// CRUD backend for editors, tweets, posts and tags
#[derive(Parser, Debug)]
#[command(name = "editorial")]
#[command(version)]
pub struct Config {
    /// HTTP bind address
    #[arg(short, long, env = "EDITORIAL_BIND", default_value = BIND_ADDRESS_DEFAULT)]
    pub bind: SocketAddr,

    /// Storage backend
    #[arg(long, env = "EDITORIAL_STORAGE", value_enum, default_value_t = Backend::Memory)]
    pub storage: Backend,

    /// Database URL, used with `--storage sqlite`
    #[arg(long, env = "EDITORIAL_DATABASE_URL", default_value = DATABASE_URL_DEFAULT)]
    pub database_url: String,

    /// Connection pool size, used with `--storage sqlite`
    #[arg(long, env = "EDITORIAL_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

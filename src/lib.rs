pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notion;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "portfolio_api=info,tower_http=info";

/// Install the global `tracing` subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

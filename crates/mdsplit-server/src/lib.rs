//! HTTP service for mdsplit.
//!
//! Exposes the markdown splitter over HTTP:
//! - `POST /api/split`: plain JSON endpoint, `{"text": "..."}` in, sections out
//! - `POST /server/mcp` (configurable): stateless JSON-RPC 2.0 endpoint
//!   offering the `split_text` tool
//! - `GET /health`: liveness and version
//!
//! # Quick Start
//!
//! ```ignore
//! use mdsplit_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8080,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum server (mdsplit-server)
//!                      │
//!                      ├─► /api/split ─────┐
//!                      │                   ├─► mdsplit_sections::split
//!                      └─► JSON-RPC tool ──┘
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Route of the JSON-RPC tool endpoint.
    pub mcp_path: String,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Application version.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            mcp_path: "/server/mcp".to_owned(),
            max_body_bytes: 10 * 1024 * 1024,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;

    let state = Arc::new(AppState {
        version: config.version,
        mcp_path: config.mcp_path,
        max_body_bytes: config.max_body_bytes,
    });
    let app = app::create_router(Arc::clone(&state));

    tracing::info!(address = %addr, mcp_path = %state.mcp_path, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdsplit config.
#[must_use]
pub fn server_config_from_config(config: &mdsplit_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        mcp_path: config.server.mcp_path.clone(),
        max_body_bytes: config.server.max_body_bytes,
        version,
    }
}

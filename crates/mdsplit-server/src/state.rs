//! Application state.
//!
//! Shared state for all request handlers.

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Application version reported by `/health` and `initialize`.
    pub(crate) version: String,
    /// Route of the JSON-RPC tool endpoint.
    pub(crate) mcp_path: String,
    /// Maximum accepted request body size in bytes.
    pub(crate) max_body_bytes: usize,
}

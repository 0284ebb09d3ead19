// ABOUTME: Defines all error types for the websearch library using thiserror.
// ABOUTME: McpError covers the wire protocol, ConnectError the tool loading path.

use std::time::Duration;

/// Errors from MCP operations.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons the search backend could not be reached.
///
/// Every variant is absorbed by the provider and turned into the fallback
/// tool list; the kinds exist so callers of `try_load_tools` can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("BRAVE_API_KEY is not configured")]
    MissingCredential,

    #[error("failed to launch search server: {0}")]
    Launch(#[source] McpError),

    #[error("handshake with search server failed: {0}")]
    Handshake(#[source] McpError),

    #[error("failed to list tools: {0}")]
    ListTools(#[source] McpError),

    #[error("search server exposes no tools")]
    NoTools,

    #[error("search server did not respond within {0:?}")]
    Timeout(Duration),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

// ABOUTME: Transport abstraction for MCP communication.
// ABOUTME: Only stdio is needed to drive a local search server.

mod stdio;

pub use stdio::StdioTransport;

use async_trait::async_trait;

use super::{McpNotification, McpRequest, McpResponse};
use crate::error::McpError;

/// Trait for MCP transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and receive a response.
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError>;

    /// Send a notification (no response expected).
    async fn notify(&self, notification: McpNotification) -> Result<(), McpError>;

    /// Shutdown the transport. Must be safe to call more than once.
    async fn shutdown(&self) -> Result<(), McpError>;
}

// ABOUTME: ToolSource - where the provider gets remote tools from.
// ABOUTME: McpToolSource launches the server, lists its tools, and tears it down.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::error::ConnectError;
use crate::mcp::{McpClient, McpSearchTool, McpServerConfig};
use crate::tool::{Tool, ToolList};

/// Loads the tools a search server exposes.
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Connect to `server`, fetch its tools, and release the connection before returning.
    async fn load_tools(&self, server: &McpServerConfig) -> Result<ToolList, ConnectError>;
}

/// The real source: an MCP stdio client.
#[derive(Debug, Clone)]
pub struct McpToolSource {
    handshake_timeout: Duration,
}

impl McpToolSource {
    pub fn new(handshake_timeout: Duration) -> Self {
        Self { handshake_timeout }
    }
}

#[async_trait]
impl ToolSource for McpToolSource {
    async fn load_tools(&self, server: &McpServerConfig) -> Result<ToolList, ConnectError> {
        let started = Instant::now();
        let mut client = McpClient::connect(server.clone())
            .await
            .map_err(ConnectError::Launch)?;

        let handshake = async {
            client.initialize().await.map_err(ConnectError::Handshake)?;
            client.list_tools().await.map_err(ConnectError::ListTools)
        };
        let outcome = tokio::time::timeout(self.handshake_timeout, handshake).await;

        // Released on every path, including timeout.
        if let Err(e) = client.shutdown().await {
            debug!(error = %e, "error shutting down MCP server");
        }

        let infos = outcome.map_err(|_| ConnectError::Timeout(self.handshake_timeout))??;
        debug!(
            server = %server.name,
            count = infos.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "listed MCP tools"
        );

        Ok(infos
            .into_iter()
            .map(|info| Arc::new(McpSearchTool::new(server.clone(), info)) as Arc<dyn Tool>)
            .collect())
    }
}

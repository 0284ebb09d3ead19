// ABOUTME: McpSearchTool wraps a tool exposed by an MCP server.
// ABOUTME: Each call opens its own connection, so the tool outlives the listing session.

use async_trait::async_trait;
use tracing::debug;

use super::{McpClient, McpServerConfig, McpToolInfo};
use crate::tool::{Tool, ToolResult};

/// A tool that proxies calls to an MCP server.
#[derive(Debug, Clone)]
pub struct McpSearchTool {
    server: McpServerConfig,
    info: McpToolInfo,
}

impl McpSearchTool {
    pub fn new(server: McpServerConfig, info: McpToolInfo) -> Self {
        Self { server, info }
    }
}

#[async_trait]
impl Tool for McpSearchTool {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn description(&self) -> &str {
        &self.info.description
    }

    fn schema(&self) -> serde_json::Value {
        self.info.input_schema.clone()
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let mut client = McpClient::connect(self.server.clone()).await?;
        debug!(tool = %self.info.name, server = client.name(), "calling MCP tool");

        let outcome = async {
            client.initialize().await?;
            client.call_tool(&self.info.name, params).await
        }
        .await;
        if let Err(e) = client.shutdown().await {
            debug!(tool = %self.info.name, error = %e, "error shutting down MCP server");
        }

        let result = outcome?;
        let content = result.text();
        if result.is_error {
            Ok(ToolResult::error(content))
        } else {
            Ok(ToolResult::text(content))
        }
    }
}

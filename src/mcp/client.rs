// ABOUTME: MCP client for connecting to MCP servers via stdio.
// ABOUTME: Covers the lifecycle and tool calls a search integration needs.

use std::sync::Arc;

use tracing::debug;

use super::transport::{StdioTransport, Transport};
use super::{
    MCP_PROTOCOL_VERSION, McpInitializeResult, McpNotification, McpRequest, McpServerCapabilities,
    McpServerConfig, McpToolInfo, McpToolResult, McpToolsListResult, McpTransport,
};
use crate::error::McpError;

/// Client for communicating with an MCP server.
pub struct McpClient {
    config: McpServerConfig,
    transport: Arc<dyn Transport>,
    capabilities: McpServerCapabilities,
}

impl McpClient {
    /// Connect to an MCP server.
    pub async fn connect(config: McpServerConfig) -> Result<Self, McpError> {
        let transport: Arc<dyn Transport> = match &config.transport {
            McpTransport::Stdio { command, args, env } => {
                Arc::new(StdioTransport::connect(command, args, env).await?)
            }
        };

        Ok(Self::with_transport(config, transport))
    }

    /// Build a client over an already established transport.
    pub fn with_transport(config: McpServerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            capabilities: McpServerCapabilities::default(),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the server capabilities (available after initialize).
    pub fn capabilities(&self) -> &McpServerCapabilities {
        &self.capabilities
    }

    /// Send a request and wait for response.
    async fn request(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let request = McpRequest::new(method, params);
        let response = self.transport.send(request).await?;

        if let Some(error) = response.error {
            return Err(McpError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| McpError::Protocol(format!("No result in '{}' response", method)))
    }

    /// Send a notification (no response expected).
    async fn notify(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<(), McpError> {
        let notification = McpNotification::new(method, params);
        self.transport.notify(notification).await
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Initialize the MCP connection.
    pub async fn initialize(&mut self) -> Result<McpInitializeResult, McpError> {
        let params = serde_json::json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "websearch",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let result = self.request("initialize", Some(params)).await?;
        let init_result: McpInitializeResult = serde_json::from_value(result)?;

        self.capabilities = init_result.capabilities.clone();
        debug!(
            server = %self.config.name,
            protocol = %init_result.protocol_version,
            "MCP server initialized"
        );

        self.notify("notifications/initialized", None).await?;

        Ok(init_result)
    }

    /// Shutdown the server connection gracefully.
    pub async fn shutdown(&self) -> Result<(), McpError> {
        self.transport.shutdown().await
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// List available tools from the server.
    pub async fn list_tools(&self) -> Result<Vec<McpToolInfo>, McpError> {
        let result = self.request("tools/list", None).await?;
        let list: McpToolsListResult = serde_json::from_value(result)?;
        Ok(list.tools)
    }

    /// Call a tool on the server.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<McpToolResult, McpError> {
        let params = serde_json::json!({
            "name": name,
            "arguments": arguments
        });

        let result = self.request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ping the server to check if it's alive.
    pub async fn ping(&self) -> Result<(), McpError> {
        self.request("ping", None).await?;
        Ok(())
    }
}

// ABOUTME: MCP module - Model Context Protocol client implementation.
// ABOUTME: Connects to MCP servers via stdio and proxies their tools.

mod client;
mod proxy;
mod transport;
mod types;

pub use client::McpClient;
pub use proxy::McpSearchTool;
pub use transport::{StdioTransport, Transport};
pub use types::*;

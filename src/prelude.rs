// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use websearch::prelude::*;` to get started quickly.

pub use crate::config::SearchConfig;
pub use crate::error::{ConnectError, McpError};
pub use crate::mcp::{
    McpClient, McpContentBlock, McpSearchTool, McpServerConfig, McpToolInfo, McpToolResult,
    McpTransport, StdioTransport, Transport,
};
pub use crate::search::{
    ExecutionContext, McpToolSource, SearchToolProvider, ToolSource, UNAVAILABLE_MESSAGE,
    UnavailableSearchTool, fallback_tools, get_search_tools, get_search_tools_sync,
    select_search_tools,
};
pub use crate::tool::{Tool, ToolList, ToolResult};

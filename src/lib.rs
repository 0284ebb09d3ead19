// ABOUTME: Root module for websearch - Brave web-search tools for agents.
// ABOUTME: Re-exports the provider, tool abstraction, and MCP client.

pub mod config;
pub mod error;
pub mod mcp;
pub mod prelude;
pub mod search;
pub mod tool;

pub use config::SearchConfig;
pub use error::{ConnectError, McpError};
pub use search::{SearchToolProvider, get_search_tools, get_search_tools_sync};

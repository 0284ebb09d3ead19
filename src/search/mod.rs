// ABOUTME: SearchToolProvider - produces the web-search tools handed to an agent.
// ABOUTME: Loads Brave tools over MCP when a key is set, otherwise a fallback tool.

mod context;
mod fallback;
mod source;

pub use context::ExecutionContext;
pub use fallback::{
    UNAVAILABLE_MESSAGE, UNAVAILABLE_TOOL_NAME, UnavailableSearchTool, fallback_tools,
};
pub use source::{McpToolSource, ToolSource};

use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::ConnectError;
use crate::tool::ToolList;

/// Substring a tool name must contain to be preferred.
const PREFERRED_TOOL_MARKER: &str = "brave";

/// Builds the list of search tools for an agent.
///
/// The result is never empty: whenever the Brave server cannot be used the
/// list holds only [`UnavailableSearchTool`].
pub struct SearchToolProvider<S = McpToolSource> {
    config: SearchConfig,
    source: S,
}

impl SearchToolProvider {
    pub fn new(config: SearchConfig) -> Self {
        let source = McpToolSource::new(config.handshake_timeout);
        Self { config, source }
    }

    pub fn from_env() -> Self {
        Self::new(SearchConfig::from_env())
    }
}

impl<S: ToolSource> SearchToolProvider<S> {
    /// Use a custom tool source.
    pub fn with_source(config: SearchConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Load tools, keeping the reason when that fails.
    pub async fn try_load_tools(&self) -> Result<ToolList, ConnectError> {
        let api_key = self.config.credential().ok_or(ConnectError::MissingCredential)?;
        let server = self.config.server_config(api_key);

        let tools = self.source.load_tools(&server).await?;
        if tools.is_empty() {
            return Err(ConnectError::NoTools);
        }
        Ok(select_search_tools(tools))
    }

    /// Get the search tools. Never fails.
    pub async fn get_search_tools(&self) -> ToolList {
        match self.try_load_tools().await {
            Ok(tools) => tools,
            Err(e) => degrade(e),
        }
    }

    /// Blocking variant of [`get_search_tools`](Self::get_search_tools) for synchronous callers.
    pub fn get_search_tools_sync(&self) -> ToolList {
        self.get_search_tools_in(ExecutionContext::detect())
    }

    /// Like [`get_search_tools_sync`](Self::get_search_tools_sync) with an explicit context.
    pub fn get_search_tools_in(&self, context: ExecutionContext) -> ToolList {
        match context.block_on(self.get_search_tools()) {
            Ok(tools) => tools,
            Err(e) => degrade(ConnectError::Runtime(e)),
        }
    }
}

/// Prefer Brave-named tools; keep everything if none match.
pub fn select_search_tools(tools: ToolList) -> ToolList {
    let preferred: ToolList = tools
        .iter()
        .filter(|t| t.name().to_lowercase().contains(PREFERRED_TOOL_MARKER))
        .cloned()
        .collect();

    if preferred.is_empty() { tools } else { preferred }
}

fn degrade(error: ConnectError) -> ToolList {
    match error {
        ConnectError::MissingCredential => debug!("BRAVE_API_KEY not set, web search disabled"),
        e => warn!("Failed to load Brave MCP tools: {}", e),
    }
    fallback_tools()
}

/// Get search tools using configuration from the environment.
pub async fn get_search_tools() -> ToolList {
    SearchToolProvider::from_env().get_search_tools().await
}

/// Blocking form of [`get_search_tools`].
pub fn get_search_tools_sync() -> ToolList {
    SearchToolProvider::from_env().get_search_tools_sync()
}

#[cfg(test)]
mod provider_test;

// ABOUTME: Stand-in tool returned whenever Brave search cannot be reached.
// ABOUTME: Ignores its input and always reports that search is unavailable.

use std::sync::Arc;

use async_trait::async_trait;

use crate::tool::{Tool, ToolList, ToolResult, query_schema};

pub const UNAVAILABLE_TOOL_NAME: &str = "brave_web_search_unavailable";
pub const UNAVAILABLE_MESSAGE: &str =
    "Web search is currently unavailable. BRAVE_API_KEY is not configured.";

/// Fallback tool when Brave search is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSearchTool;

#[async_trait]
impl Tool for UnavailableSearchTool {
    fn name(&self) -> &str {
        UNAVAILABLE_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fallback tool when Brave search is not available."
    }

    fn schema(&self) -> serde_json::Value {
        query_schema()
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text(UNAVAILABLE_MESSAGE).with_metadata("fallback", true))
    }
}

/// The single-element list used on every degraded path.
pub fn fallback_tools() -> ToolList {
    vec![Arc::new(UnavailableSearchTool)]
}

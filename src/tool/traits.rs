// ABOUTME: Defines the Tool trait - the core abstraction for agent capabilities.
// ABOUTME: Tools have a name, description, schema, and async execute method.

use std::sync::Arc;

use async_trait::async_trait;

use super::ToolResult;

/// Ordered tools handed to the agent framework.
pub type ToolList = Vec<Arc<dyn Tool>>;

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the LLM.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;

    /// Run the tool with a single search query and return its text output.
    async fn invoke(&self, query: &str) -> Result<String, anyhow::Error> {
        let result = self.execute(serde_json::json!({ "query": query })).await?;
        Ok(result.content)
    }
}

/// Shared JSON Schema for tools taking a single `query` string.
pub fn query_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            }
        },
        "required": ["query"]
    })
}

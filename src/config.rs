// ABOUTME: Configuration for the Brave search integration.
// ABOUTME: Read once from the environment and injected into the provider.

use std::collections::HashMap;
use std::time::Duration;

use crate::mcp::{McpServerConfig, McpTransport};

pub const API_KEY_VAR: &str = "BRAVE_API_KEY";
pub const COMMAND_VAR: &str = "BRAVE_MCP_COMMAND";
pub const PACKAGE_VAR: &str = "BRAVE_MCP_PACKAGE";
pub const TIMEOUT_VAR: &str = "BRAVE_MCP_TIMEOUT_SECS";

pub const DEFAULT_COMMAND: &str = "npx";
pub const DEFAULT_PACKAGE: &str = "@brave/brave-search-mcp-server";
/// `npx -y` may download the package on first use, so this is generous.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Name the search server is registered under.
pub const SERVER_NAME: &str = "brave";

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Brave API key. `None` puts the provider in degraded mode.
    pub credential: Option<String>,
    /// Package runner used to launch the server.
    pub command: String,
    /// Package the runner executes.
    pub package: String,
    /// Upper bound on initialize + tools/list.
    pub handshake_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            credential: None,
            command: DEFAULT_COMMAND.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            credential: non_empty(API_KEY_VAR),
            command: non_empty(COMMAND_VAR).unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
            package: non_empty(PACKAGE_VAR).unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
            handshake_timeout: non_empty(TIMEOUT_VAR)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_HANDSHAKE_TIMEOUT),
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// The configured key, treating an empty string as absent.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref().filter(|k| !k.is_empty())
    }

    /// Launch arguments for the package runner.
    pub fn launch_args(&self, api_key: &str) -> Vec<String> {
        vec![
            "-y".to_string(),
            self.package.clone(),
            "--transport".to_string(),
            "stdio".to_string(),
            "--brave-api-key".to_string(),
            api_key.to_string(),
        ]
    }

    pub fn server_config(&self, api_key: &str) -> McpServerConfig {
        McpServerConfig {
            name: SERVER_NAME.to_string(),
            transport: McpTransport::Stdio {
                command: self.command.clone(),
                args: self.launch_args(api_key),
                env: HashMap::new(),
            },
        }
    }
}

// ABOUTME: Tests for SearchToolProvider - credential branch, filtering, fallback.
// ABOUTME: Uses in-memory tool sources so no subprocess is launched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing_test::traced_test;

use super::*;
use crate::error::McpError;
use crate::mcp::{McpServerConfig, McpTransport};
use crate::tool::{Tool, ToolResult, query_schema};

struct NamedTool(&'static str);

#[async_trait]
impl Tool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "test tool"
    }

    fn schema(&self) -> serde_json::Value {
        query_schema()
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text(format!(
            "{}: {}",
            self.0,
            params["query"].as_str().unwrap_or("")
        )))
    }
}

/// Returns fixed tool names and records how it was called.
#[derive(Default)]
struct StaticSource {
    names: Vec<&'static str>,
    calls: AtomicUsize,
    last_server: Mutex<Option<McpServerConfig>>,
}

impl StaticSource {
    fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ToolSource for StaticSource {
    async fn load_tools(&self, server: &McpServerConfig) -> Result<ToolList, ConnectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_server.lock().unwrap() = Some(server.clone());
        Ok(self
            .names
            .iter()
            .map(|n| Arc::new(NamedTool(*n)) as Arc<dyn Tool>)
            .collect())
    }
}

struct FailingSource;

#[async_trait]
impl ToolSource for FailingSource {
    async fn load_tools(&self, _server: &McpServerConfig) -> Result<ToolList, ConnectError> {
        Err(ConnectError::Launch(McpError::Connection(
            "npx: No such file or directory".into(),
        )))
    }
}

fn keyed() -> SearchConfig {
    SearchConfig::default().with_credential("test-key")
}

/// A keyed provider over a fixed listing.
fn listing(names: &[&'static str]) -> SearchToolProvider<StaticSource> {
    SearchToolProvider::with_source(keyed(), StaticSource::new(names))
}

fn names(tools: &ToolList) -> Vec<String> {
    tools.iter().map(|t| t.name().to_string()).collect()
}

async fn assert_fallback(tools: &ToolList) {
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name(), UNAVAILABLE_TOOL_NAME);
    assert_eq!(tools[0].invoke("anything").await.unwrap(), UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_missing_key_returns_fallback_without_launching() {
    let provider = SearchToolProvider::with_source(
        SearchConfig::default(),
        StaticSource::new(&["brave_web_search"]),
    );

    let tools = provider.get_search_tools().await;

    assert_fallback(&tools).await;
    assert_eq!(provider.source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_key_returns_fallback() {
    let config = SearchConfig::default().with_credential("");
    let source = StaticSource::new(&["brave_web_search"]);
    let provider = SearchToolProvider::with_source(config, source);

    assert_fallback(&provider.get_search_tools().await).await;
    assert!(matches!(
        provider.try_load_tools().await,
        Err(ConnectError::MissingCredential)
    ));
}

#[tokio::test]
#[traced_test]
async fn test_launch_failure_logs_warning_and_falls_back() {
    let provider = SearchToolProvider::with_source(keyed(), FailingSource);

    let tools = provider.get_search_tools().await;

    assert_fallback(&tools).await;
    assert!(logs_contain("Failed to load Brave MCP tools"));
    assert!(logs_contain("No such file or directory"));
}

#[tokio::test]
#[traced_test]
async fn test_missing_key_does_not_warn() {
    let provider = SearchToolProvider::with_source(SearchConfig::default(), FailingSource);

    provider.get_search_tools().await;

    assert!(!logs_contain("Failed to load Brave MCP tools"));
}

#[tokio::test]
async fn test_filters_to_brave_tools() {
    let provider = listing(&["brave_web_search", "other_tool"]);

    let tools = provider.get_search_tools().await;

    assert_eq!(names(&tools), vec!["brave_web_search"]);
    assert_eq!(tools[0].invoke("rust").await.unwrap(), "brave_web_search: rust");
}

#[tokio::test]
async fn test_keeps_all_tools_when_none_match() {
    let provider = listing(&["search_a", "search_b"]);

    let tools = provider.get_search_tools().await;

    assert_eq!(names(&tools), vec!["search_a", "search_b"]);
}

#[tokio::test]
async fn test_filter_is_case_insensitive_and_keeps_order() {
    let provider = SearchToolProvider::with_source(
        keyed(),
        StaticSource::new(&["Brave_Local_Search", "fetch", "web_BRAVE_news"]),
    );

    let tools = provider.get_search_tools().await;

    assert_eq!(names(&tools), vec!["Brave_Local_Search", "web_BRAVE_news"]);
}

#[tokio::test]
async fn test_empty_tool_list_falls_back() {
    let provider = listing(&[]);

    assert!(matches!(
        provider.try_load_tools().await,
        Err(ConnectError::NoTools)
    ));
    assert_fallback(&provider.get_search_tools().await).await;
}

#[tokio::test]
async fn test_source_receives_launch_contract() {
    let provider = listing(&["brave_web_search"]);

    provider.get_search_tools().await;

    let server = provider.source.last_server.lock().unwrap().clone().unwrap();
    let McpTransport::Stdio { command, args, .. } = server.transport;
    assert_eq!(command, "npx");
    assert_eq!(args[0], "-y");
    assert_eq!(args[1], "@brave/brave-search-mcp-server");
    assert_eq!(&args[2..4], ["--transport", "stdio"]);
    assert_eq!(&args[4..], ["--brave-api-key", "test-key"]);
}

#[tokio::test]
async fn test_each_call_loads_fresh_tools() {
    let provider = listing(&["brave_web_search"]);

    provider.get_search_tools().await;
    provider.get_search_tools().await;

    assert_eq!(provider.source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_real_source_with_missing_binary_falls_back() {
    let config = SearchConfig {
        command: "/nonexistent/npx".into(),
        ..keyed()
    };
    let provider = SearchToolProvider::new(config);

    assert!(matches!(
        provider.try_load_tools().await,
        Err(ConnectError::Launch(_))
    ));
    assert_fallback(&provider.get_search_tools().await).await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_silent_server_times_out() {
    let source = McpToolSource::new(Duration::from_millis(200));
    let server = McpServerConfig {
        name: "silent".into(),
        transport: McpTransport::Stdio {
            command: "sleep".into(),
            args: vec!["5".into()],
            env: Default::default(),
        },
    };

    let started = std::time::Instant::now();
    let result = source.load_tools(&server).await;

    assert!(matches!(result, Err(ConnectError::Timeout(_))));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_sync_without_runtime_matches_async() {
    let provider = listing(&["brave_web_search", "other_tool"]);

    let sync_tools = provider.get_search_tools_sync();
    let async_tools = tokio_test::block_on(provider.get_search_tools());

    assert_eq!(names(&sync_tools), names(&async_tools));
    assert_eq!(names(&sync_tools), vec!["brave_web_search"]);
}

#[test]
fn test_sync_fallback_without_runtime() {
    let provider = SearchToolProvider::with_source(SearchConfig::default(), FailingSource);

    let tools = provider.get_search_tools_sync();

    assert_eq!(names(&tools), vec![UNAVAILABLE_TOOL_NAME]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_inside_multi_thread_runtime() {
    let provider = listing(&["search_a", "search_b"]);

    let tools = provider.get_search_tools_sync();

    assert_eq!(names(&tools), vec!["search_a", "search_b"]);
}

#[tokio::test]
async fn test_sync_inside_current_thread_runtime() {
    let provider = listing(&["brave_web_search", "other_tool"]);

    let tools = provider.get_search_tools_sync();

    assert_eq!(names(&tools), vec!["brave_web_search"]);
}

#[test]
fn test_explicit_detached_context() {
    let provider = listing(&["brave_web_search"]);

    let tools = provider.get_search_tools_in(ExecutionContext::Detached);

    assert_eq!(names(&tools), vec!["brave_web_search"]);
}

#[tokio::test]
async fn test_never_empty() {
    let credentials = [None, Some(""), Some("key")];
    let listings: [&[&'static str]; 4] = [
        &[],
        &["brave_web_search"],
        &["search_a"],
        &["brave_web_search", "other_tool"],
    ];

    for credential in credentials {
        let mut config = SearchConfig::default();
        config.credential = credential.map(str::to_string);

        let failing = SearchToolProvider::with_source(config.clone(), FailingSource);
        assert!(!failing.get_search_tools().await.is_empty());

        for listed in listings {
            let source = StaticSource::new(listed);
            let provider = SearchToolProvider::with_source(config.clone(), source);
            assert!(!provider.get_search_tools().await.is_empty());
        }
    }
}

#[test]
fn test_select_search_tools_direct() {
    let tools: ToolList = vec![Arc::new(NamedTool("other")), Arc::new(NamedTool("brave_news"))];
    assert_eq!(names(&select_search_tools(tools)), vec!["brave_news"]);
}

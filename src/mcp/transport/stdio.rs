// ABOUTME: Stdio transport for MCP communication.
// ABOUTME: Spawns a subprocess and exchanges line-delimited JSON-RPC over stdin/stdout.

use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::Transport;
use crate::error::McpError;
use crate::mcp::{McpNotification, McpRequest, McpResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const EXIT_GRACE: Duration = Duration::from_millis(500);

/// In-flight requests by id. `None` once the server's stdout has closed.
type Pending = Arc<Mutex<Option<HashMap<u64, mpsc::Sender<McpResponse>>>>>;

/// Stdio transport - spawns a subprocess and communicates via JSON-RPC over stdin/stdout.
pub struct StdioTransport {
    child: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    pending: Pending,
    reader_handle: Mutex<Option<JoinHandle<()>>>,
}

impl StdioTransport {
    /// Create a new stdio transport by spawning a subprocess.
    pub async fn connect(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> Result<Self, McpError> {
        let mut cmd = Command::new(command);
        cmd.args(args)
            .envs(env.iter())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| McpError::Connection(format!("{}: {}", command, e)))?;
        debug!(command, pid = child.id(), "spawned MCP server");

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| McpError::Connection("Failed to open stdin".into()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| McpError::Connection("Failed to open stdout".into()))?;

        let pending: Pending = Arc::new(Mutex::new(Some(HashMap::new())));

        // Only responses are routed. Server requests and notifications carry a
        // `method` and are dropped, as are lines that are not JSON-RPC at all.
        let pending_clone = pending.clone();
        let reader_handle = tokio::spawn(async move {
            let mut reader = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                match parse_response(&line) {
                    Some(response) => {
                        let tx = pending_clone
                            .lock()
                            .await
                            .as_mut()
                            .and_then(|p| p.remove(&response.id));
                        if let Some(tx) = tx {
                            let _ = tx.send(response).await;
                        }
                    }
                    None => trace!(line = %line, "ignoring non-response line"),
                }
            }
            // Dropping the senders wakes every waiter with `None`.
            pending_clone.lock().await.take();
        });

        Ok(Self {
            child: Mutex::new(Some(child)),
            stdin: Mutex::new(Some(stdin)),
            pending,
            reader_handle: Mutex::new(Some(reader_handle)),
        })
    }

    async fn forget(&self, id: u64) {
        if let Some(pending) = self.pending.lock().await.as_mut() {
            pending.remove(&id);
        }
    }

    async fn write_line(&self, json: &str) -> Result<(), McpError> {
        let mut stdin = self.stdin.lock().await;
        let stdin_ref = stdin
            .as_mut()
            .ok_or_else(|| McpError::Connection("Server connection closed".into()))?;
        stdin_ref.write_all(json.as_bytes()).await?;
        stdin_ref.write_all(b"\n").await?;
        stdin_ref.flush().await?;
        Ok(())
    }
}

fn parse_response(line: &str) -> Option<McpResponse> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    if value.get("method").is_some() {
        return None;
    }
    serde_json::from_value(value).ok()
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError> {
        let id = request.id;

        let (tx, mut rx) = mpsc::channel(1);
        match self.pending.lock().await.as_mut() {
            Some(pending) => pending.insert(id, tx),
            None => return Err(McpError::Connection("Server exited".into())),
        };

        let write_result = match serde_json::to_string(&request) {
            Ok(json) => self.write_line(&json).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = write_result {
            self.forget(id).await;
            return Err(e);
        }

        match tokio::time::timeout(REQUEST_TIMEOUT, rx.recv()).await {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(McpError::Protocol(format!(
                "Server closed before answering '{}'",
                request.method
            ))),
            Err(_) => {
                self.forget(id).await;
                Err(McpError::Protocol(format!(
                    "Request '{}' timed out",
                    request.method
                )))
            }
        }
    }

    async fn notify(&self, notification: McpNotification) -> Result<(), McpError> {
        let json = serde_json::to_string(&notification)?;
        self.write_line(&json).await
    }

    async fn shutdown(&self) -> Result<(), McpError> {
        // Closing stdin is the stdio transport's exit signal.
        self.stdin.lock().await.take();

        if let Some(handle) = self.reader_handle.lock().await.take() {
            handle.abort();
        }

        if let Some(mut child) = self.child.lock().await.take() {
            if tokio::time::timeout(EXIT_GRACE, child.wait()).await.is_err() {
                debug!(pid = child.id(), "MCP server ignored stdin close, killing");
                let _ = child.kill().await;
            }
        }

        Ok(())
    }
}

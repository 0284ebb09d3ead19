// ABOUTME: websearch CLI - lists the search tools an agent would get, or runs a query.
// ABOUTME: Reads BRAVE_API_KEY from the environment or a .env file.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use websearch::prelude::*;

#[derive(Parser)]
#[command(name = "websearch", version, about = "Brave web search over MCP")]
struct Cli {
    /// Seconds to wait for the search server to list its tools.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tools that would be handed to an agent.
    Tools,
    /// Run a query through the first available tool.
    Search {
        /// The search query.
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("websearch=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SearchConfig::from_env();
    if let Some(secs) = cli.timeout {
        config = config.with_handshake_timeout(Duration::from_secs(secs));
    }
    let tools = SearchToolProvider::new(config).get_search_tools().await;

    match cli.command {
        Command::Tools => {
            for tool in &tools {
                println!("{}\t{}", tool.name(), tool.description());
            }
        }
        Command::Search { query } => {
            let tool = tools.first().context("no search tool available")?;
            let output = tool
                .invoke(&query)
                .await
                .with_context(|| format!("{} failed", tool.name()))?;
            println!("{}", output);
        }
    }

    Ok(())
}

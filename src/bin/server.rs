//! AutoCompChem MCP Server
//!
//! Run with: autocompchem-mcp

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autocompchem_mcp::options::{BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
use autocompchem_mcp::{AutoCompChemServer, ClientOptions};

#[derive(Parser, Debug)]
#[command(name = "autocompchem-mcp")]
#[command(about = "MCP server exposing AutoCompChem computational chemistry tools")]
struct Args {
    /// Base URL of the AutoCompChem REST server
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV, default_value = "300")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries MCP frames
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let options = ClientOptions::new()
        .with_base_url(args.base_url)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    info!(
        "Starting AutoCompChem MCP server (base URL {}, timeout {:?})",
        options.base_url, options.timeout
    );

    let service = AutoCompChemServer::from_options(options)
        .serve(stdio())
        .await?;
    service.waiting().await?;

    info!("MCP peer disconnected, shutting down");
    Ok(())
}

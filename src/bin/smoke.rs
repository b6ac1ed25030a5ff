//! Smoke test for a running AutoCompChem server.
//!
//! Exercises the endpoints the MCP tools use and exits 0 when at least three
//! of the five checks pass.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autocompchem_mcp::options::{BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
use autocompchem_mcp::smoke;
use autocompchem_mcp::{AutoCompChemClient, ClientOptions};

#[derive(Parser, Debug)]
#[command(name = "autocompchem-smoke")]
#[command(about = "Check that an AutoCompChem server answers the endpoints used by the MCP tools")]
struct Args {
    /// Base URL of the AutoCompChem REST server
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV, default_value = "300")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();

    let args = Args::parse();
    let client = AutoCompChemClient::new(
        ClientOptions::new()
            .with_base_url(args.base_url)
            .with_timeout(Duration::from_secs(args.timeout_secs)),
    );
    let base_url = &client.options().base_url;

    println!("{}", "=".repeat(60));
    println!("AutoCompChem MCP Server Test Suite ({base_url})");
    println!("{}", "=".repeat(60));

    let report = smoke::run_all(&client).await;

    for check in &report.results {
        let status = if check.passed { "PASS" } else { "FAIL" };
        println!("\n[{status}] {}\n{}", check.name, check.detail);
    }

    println!("\nOverall: {}/{} checks passed", report.passed(), report.total());

    if report.is_healthy() {
        println!("AutoCompChem server looks usable from the MCP tools.");
        ExitCode::SUCCESS
    } else {
        println!("Some critical checks failed. Check AutoCompChem server status:");
        println!("  curl {base_url}/api/v1/autocompchem/health");
        ExitCode::FAILURE
    }
}

//! # autocompchem-mcp - AutoCompChem tools over MCP
//!
//! A thin adapter exposing the AutoCompChem computational chemistry REST API
//! as Model Context Protocol tools. No chemistry happens here: every tool
//! forwards one or two HTTP calls to a running AutoCompChem server and turns
//! the JSON reply into text an LLM can read.
//!
//! ## Architecture
//!
//! 1. **`ClientOptions`** carries the base URL and timeout, built once at startup.
//! 2. **`AutoCompChemClient`** implements [`RemoteApi`], issuing one GET or POST per call.
//! 3. **`format`** turns typed response shapes into display strings.
//! 4. **`AutoCompChemServer`** is the `rmcp` handler wiring tools to the client.
//!
//! ## Example
//! ```no_run
//! use autocompchem_mcp::{AutoCompChemServer, ClientOptions};
//! use rmcp::{transport::stdio, ServiceExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = AutoCompChemServer::from_options(ClientOptions::from_env());
//!     let service = server.serve(stdio()).await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod format;
pub mod http;
pub mod options;
pub mod server;
pub mod smoke;

pub use client::{AutoCompChemClient, ClientError, RemoteApi};
pub use options::ClientOptions;
pub use server::AutoCompChemServer;

// Re-export rmcp for convenience
pub use rmcp;

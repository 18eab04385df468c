//! Calculator MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing arithmetic tools and a
//! sandboxed expression evaluator that never executes input as code.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, the main server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **calculator**: Parser, allow-list validator, reducer and rounding
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: Data resources that can be read by clients
//!   - **prompts**: Prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use calculator_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::calculator::{CalcError, Evaluator};

//! Demo weather tool served over MCP, and a weather assistant agent behind a
//! serverless invocation entry point.

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod mcp;
pub mod ollama;
pub mod tools;
pub mod weather;

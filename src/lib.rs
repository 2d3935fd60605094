//! mcp-probe
//!
//! Connects to an MCP server over SSE, checks liveness, lists what it exposes and
//! invokes one tool. The outcome is reported through the process exit status.
#![deny(unsafe_code)]

pub mod mcp;
pub mod probe;

pub use mcp::client::{ProbeError, Result};
pub use probe::{ProbeConfig, ProbeReport};

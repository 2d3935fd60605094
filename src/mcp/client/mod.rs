//! MCP client layer for the probe
//!
//! Thin wrapper around the official `rmcp` SDK: an SSE session, the peer trait the
//! probe runner is written against, credential handling and the error taxonomy.

pub mod auth;
pub mod error;
pub mod mcp_client;
pub mod registry;
pub mod transport;

pub use auth::{AuthConfig, SecureCredential};
pub use error::{ProbeError, Result};
pub use mcp_client::SseSession;
pub use registry::{PromptInfo, ResourceInfo, ToolInfo, ToolRegistry};
pub use transport::{McpPeer, ToolArguments};

//! Abstraction over the remote MCP peer the probe talks to

use crate::mcp::client::error::Result;
use crate::mcp::client::registry::{PromptInfo, ResourceInfo, ToolInfo};
use async_trait::async_trait;

/// Arguments passed to a tool call
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// The remote operations consumed by a probe run
#[async_trait]
pub trait McpPeer: Send + Sync {
    /// Round-trip liveness check
    async fn ping(&self) -> Result<()>;

    /// Tools in server order
    async fn list_tools(&self) -> Result<Vec<ToolInfo>>;

    async fn list_resources(&self) -> Result<Vec<ResourceInfo>>;

    async fn list_prompts(&self) -> Result<Vec<PromptInfo>>;

    /// Invoke a tool and return its serialized result
    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<serde_json::Value>;

    /// Release the connection gracefully
    async fn close(&mut self) -> Result<()>;
}

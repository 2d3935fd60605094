//! Read-only descriptors of what an MCP server exposes
//!
//! Descriptors are decoded from the serialized `rmcp` model types so that only the
//! fields the probe reports on are kept.

use crate::mcp::client::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an MCP tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(default)]
    pub description: Option<String>,
    /// Input schema for parameters (JSON Schema)
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolInfo {
    pub fn new<S: Into<String>>(name: S, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            input_schema: None,
        }
    }

    /// Decode from any serializable `rmcp` tool model
    pub fn from_rmcp<T: Serialize>(tool: &T) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(tool)?)?)
    }
}

/// Information about a readable MCP resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub uri: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ResourceInfo {
    pub fn from_rmcp<T: Serialize>(resource: &T) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(resource)?)?)
    }
}

/// Information about an invocable MCP prompt template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PromptInfo {
    pub fn from_rmcp<T: Serialize>(prompt: &T) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(prompt)?)?)
    }
}

/// Tools in the order the server listed them
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolInfo>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<ToolInfo>) -> Self {
        Self { tools }
    }

    /// Get tool information by name
    pub fn get_tool(&self, name: &str) -> Option<&ToolInfo> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// First tool as listed by the server
    pub fn first(&self) -> Option<&ToolInfo> {
        self.tools.first()
    }

    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

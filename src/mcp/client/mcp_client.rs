//! MCP session over the SSE transport, backed by the `rmcp` SDK

use crate::mcp::client::auth::AuthConfig;
use crate::mcp::client::error::{ProbeError, Result};
use crate::mcp::client::registry::{PromptInfo, ResourceInfo, ToolInfo};
use crate::mcp::client::transport::{McpPeer, ToolArguments};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParam, ClientRequest, PingRequest},
    service::RunningService,
    transport::{SseClientTransport, sse_client::SseClientConfig},
};

/// A live connection to one MCP server.
///
/// Dropping the session cancels the underlying `rmcp` service, so the connection is
/// released even when [`McpPeer::close`] is never reached.
pub struct SseSession {
    service: Option<RunningService<RoleClient, ()>>,
    endpoint: String,
}

impl SseSession {
    /// Open the SSE stream at `endpoint` and complete the MCP initialize handshake
    pub async fn connect(
        endpoint: &str,
        auth: &AuthConfig,
        connect_timeout: Duration,
    ) -> Result<Self> {
        info!(endpoint = %endpoint, auth = auth.is_enabled(), "Connecting to MCP server");

        let http_client = reqwest::Client::builder()
            .default_headers(auth.auth_headers()?)
            .build()
            .map_err(|e| ProbeError::config(format!("failed to build HTTP client: {}", e)))?;

        let handshake = async {
            let transport = SseClientTransport::start_with_client(
                http_client,
                SseClientConfig {
                    sse_endpoint: endpoint.into(),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| {
                ProbeError::Connectivity(format!(
                    "failed to open SSE stream at {}: {}",
                    endpoint, e
                ))
            })?;

            ().serve(transport).await.map_err(|e| {
                ProbeError::Connectivity(format!("MCP handshake with {} failed: {}", endpoint, e))
            })
        };

        let service = tokio::time::timeout(connect_timeout, handshake)
            .await
            .map_err(|_| {
                ProbeError::Connectivity(format!(
                    "no MCP handshake from {} within {}ms",
                    endpoint,
                    connect_timeout.as_millis()
                ))
            })??;

        debug!(peer = ?service.peer_info(), "MCP handshake complete");

        Ok(Self {
            service: Some(service),
            endpoint: endpoint.to_string(),
        })
    }

    fn service(&self) -> Result<&RunningService<RoleClient, ()>> {
        self.service
            .as_ref()
            .ok_or_else(|| ProbeError::Protocol("MCP session already closed".to_string()))
    }
}

#[async_trait]
impl McpPeer for SseSession {
    async fn ping(&self) -> Result<()> {
        self.service()?
            .send_request(ClientRequest::PingRequest(PingRequest::default()))
            .await
            .map_err(|e| ProbeError::Connectivity(format!("ping failed: {}", e)))?;
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let tools = self
            .service()?
            .list_all_tools()
            .await
            .map_err(|e| ProbeError::Protocol(format!("failed to list tools: {}", e)))?;

        tools.iter().map(ToolInfo::from_rmcp).collect()
    }

    async fn list_resources(&self) -> Result<Vec<ResourceInfo>> {
        let resources = self
            .service()?
            .list_all_resources()
            .await
            .map_err(|e| ProbeError::Protocol(format!("failed to list resources: {}", e)))?;

        resources.iter().map(ResourceInfo::from_rmcp).collect()
    }

    async fn list_prompts(&self) -> Result<Vec<PromptInfo>> {
        let prompts = self
            .service()?
            .list_all_prompts()
            .await
            .map_err(|e| ProbeError::Protocol(format!("failed to list prompts: {}", e)))?;

        prompts.iter().map(PromptInfo::from_rmcp).collect()
    }

    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<serde_json::Value> {
        let request = CallToolRequestParam {
            name: name.to_string().into(),
            arguments: Some(arguments),
        };

        let response = self
            .service()?
            .call_tool(request)
            .await
            .map_err(|e| ProbeError::Invocation {
                tool: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(serde_json::to_value(&response)?)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(service) = self.service.take() {
            let reason = service
                .cancel()
                .await
                .map_err(|e| ProbeError::Protocol(format!("failed to close session: {}", e)))?;
            debug!(endpoint = %self.endpoint, reason = ?reason, "MCP session closed");
        }
        Ok(())
    }
}

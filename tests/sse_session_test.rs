//! End-to-end tests against a real rmcp SSE server running in the test process

use anyhow::Result;
use mcp_probe::ProbeConfig;
use mcp_probe::mcp::client::{AuthConfig, McpPeer, SseSession, ToolArguments};
use mcp_probe::probe::run;
use rmcp::{
    Error as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ListPromptsResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::sse_server::SseServer,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

const BIN: &str = env!("CARGO_BIN_EXE_mcp-probe");

/// Minimal MCP server exposing a fixed list of tools
#[derive(Clone)]
struct FixtureServer {
    tools: Vec<&'static str>,
}

impl ServerHandler for FixtureServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let schema = json!({"type": "object", "properties": {}})
            .as_object()
            .cloned()
            .unwrap_or_default();

        let tools = self
            .tools
            .iter()
            .map(|name| Tool::new(*name, format!("{} fixture tool", name), Arc::new(schema.clone())))
            .collect();

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: Vec::new(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let reply = if request.name == "example_usage" {
            "ok".to_string()
        } else {
            format!("{} ok", request.name)
        };
        Ok(CallToolResult::success(vec![Content::text(reply)]))
    }
}

/// A running SSE server, shut down on drop
struct SseServerFixture {
    addr: SocketAddr,
    ct: CancellationToken,
}

impl SseServerFixture {
    async fn start(tools: Vec<&'static str>) -> Result<Self> {
        // Reserve a free port, then hand it to the SSE server
        let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;

        let ct = SseServer::serve(addr)
            .await?
            .with_service(move || FixtureServer {
                tools: tools.clone(),
            });

        Ok(Self { addr, ct })
    }

    fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for SseServerFixture {
    fn drop(&mut self) {
        self.ct.cancel();
    }
}

async fn run_binary(server_url: &str) -> Result<std::process::Output> {
    Ok(Command::new(BIN)
        .env_remove("MCPAC_API_KEY")
        .env_remove("RUST_LOG")
        .env("MCP_APP_URL", server_url)
        .args(["--connect-timeout-secs", "10", "--timeout-secs", "10"])
        .output()
        .await?)
}

#[tokio::test]
async fn test_binary_invokes_well_known_tool_and_passes() -> Result<()> {
    let server = SseServerFixture::start(vec!["example_usage"]).await?;

    let output = run_binary(&server.base_url()).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Authentication disabled"), "stdout: {stdout}");
    assert!(stdout.contains("Available tools (1):"), "stdout: {stdout}");
    assert!(stdout.contains("Tool 'example_usage' result: ok"), "stdout: {stdout}");
    assert!(stdout.contains("✅ Ping OK"), "stdout: {stdout}");
    Ok(())
}

#[tokio::test]
async fn test_binary_falls_back_to_first_listed_tool() -> Result<()> {
    let server = SseServerFixture::start(vec!["status", "describe"]).await?;

    let output = run_binary(&server.base_url()).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}\nstderr: {stderr}");
    assert!(
        stdout.contains("Tool 'example_usage' not found, falling back to 'status'"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Tool 'status' result: status ok"), "stdout: {stdout}");
    assert!(!stdout.contains("describe ok"), "stdout: {stdout}");
    Ok(())
}

#[tokio::test]
async fn test_binary_fails_when_server_has_no_tools() -> Result<()> {
    let server = SseServerFixture::start(Vec::new()).await?;

    let output = run_binary(&server.base_url()).await?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[discovery]"));
    Ok(())
}

#[tokio::test]
async fn test_run_reports_tool_result() -> Result<()> {
    let server = SseServerFixture::start(vec!["example_usage"]).await?;
    let config = ProbeConfig::builder()
        .server_url(Some(server.base_url()))
        .connect_timeout(Duration::from_secs(10))
        .call_timeout(Duration::from_secs(10))
        .build()?;

    let report = run(&config).await?;

    assert_eq!(report.tool, "example_usage");
    assert!(!report.used_fallback);
    assert_eq!(report.summary, "ok");
    assert_eq!(report.tool_count, 1);
    assert_eq!(report.resource_count, 0);
    assert_eq!(report.prompt_count, 0);
    Ok(())
}

#[tokio::test]
async fn test_session_operations_round_trip() -> Result<()> {
    let server = SseServerFixture::start(vec!["example_usage", "status"]).await?;
    let endpoint = format!("http://{}/sse", server.addr);

    let mut session =
        SseSession::connect(&endpoint, &AuthConfig::new(), Duration::from_secs(10)).await?;

    session.ping().await?;

    let tools = session.list_tools().await?;
    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(names, vec!["example_usage", "status"]);
    assert_eq!(
        tools[0].description.as_deref(),
        Some("example_usage fixture tool")
    );
    assert!(tools[0].input_schema.is_some());

    assert!(session.list_resources().await?.is_empty());
    assert!(session.list_prompts().await?.is_empty());

    let result = session.call_tool("status", ToolArguments::new()).await?;
    assert_eq!(result["content"][0]["text"], "status ok");

    session.close().await?;
    assert!(session.ping().await.is_err(), "closed session still answers");
    Ok(())
}

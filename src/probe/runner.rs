//! The probe sequence: connect, ping, discover, invoke one tool, report

use crate::mcp::client::error::{ProbeError, Result};
use crate::mcp::client::mcp_client::SseSession;
use crate::mcp::client::registry::{ToolInfo, ToolRegistry};
use crate::mcp::client::transport::{McpPeer, ToolArguments};
use crate::probe::config::{API_KEY_ENV, ProbeConfig};
use crate::probe::report::{ProbeReport, is_error_result, render_result, truncate_chars};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Run the whole probe against the configured server.
///
/// The session is closed on every handled path before the outcome is returned.
pub async fn run(config: &ProbeConfig) -> Result<ProbeReport> {
    if config.auth().is_enabled() {
        println!("🔐 Authentication enabled (bearer token from {})", API_KEY_ENV);
    } else {
        println!("🔓 Authentication disabled ({} not set)", API_KEY_ENV);
    }

    let endpoint = config.sse_endpoint();
    println!("Connecting to {}", endpoint);

    let mut session =
        SseSession::connect(&endpoint, config.auth(), config.connect_timeout()).await?;
    println!("✅ Connected");

    run_session(&mut session, config).await
}

/// Probe an already connected peer, then release it
pub async fn run_session<P: McpPeer>(peer: &mut P, config: &ProbeConfig) -> Result<ProbeReport> {
    let outcome = probe(&*peer, config).await;

    if let Err(e) = peer.close().await {
        warn!(error = %e, "Failed to close MCP session cleanly");
    }

    outcome
}

/// Ping, discover and invoke against a connected peer
pub async fn probe<P: McpPeer + ?Sized>(peer: &P, config: &ProbeConfig) -> Result<ProbeReport> {
    peer.ping().await?;
    println!("✅ Ping OK");

    let registry = ToolRegistry::new(peer.list_tools().await?);
    println!("Available tools ({}):", registry.len());
    for tool in registry.tools() {
        println!(
            "  • {} - {}",
            tool.name,
            tool.description.as_deref().unwrap_or("(no description)")
        );
    }

    let resources = peer.list_resources().await?;
    println!("Available resources ({}):", resources.len());
    for resource in &resources {
        println!("  • {}", resource.name.as_deref().unwrap_or(&resource.uri));
    }

    let prompts = peer.list_prompts().await?;
    println!("Available prompts ({}):", prompts.len());
    for prompt in &prompts {
        println!("  • {}", prompt.name);
    }

    if registry.is_empty() {
        return Err(ProbeError::NoTools);
    }

    let (tool, used_fallback, result) = if let Some(tool) = registry.get_tool(config.target_tool())
    {
        let result = call_primary(peer, tool, config.call_timeout()).await?;
        (tool, false, result)
    } else {
        let tool = registry.first().ok_or(ProbeError::NoTools)?;
        warn!(
            target_tool = %config.target_tool(),
            fallback = %tool.name,
            "Target tool not exposed, falling back to first listed tool"
        );
        println!(
            "Tool '{}' not found, falling back to '{}'",
            config.target_tool(),
            tool.name
        );
        let result = call_fallback(peer, tool, config.call_timeout()).await?;
        (tool, true, result)
    };

    if is_error_result(&result) {
        warn!(tool = %tool.name, "Server flagged the tool result as an error");
    }

    let summary = truncate_chars(&render_result(&result), config.result_budget());
    println!("✅ Tool '{}' result: {}", tool.name, summary);

    Ok(ProbeReport {
        tool: tool.name.clone(),
        used_fallback,
        summary,
        tool_count: registry.len(),
        resource_count: resources.len(),
        prompt_count: prompts.len(),
    })
}

/// Well-known tool call; running out of time is reported as a timeout
async fn call_primary<P: McpPeer + ?Sized>(
    peer: &P,
    tool: &ToolInfo,
    timeout: Duration,
) -> Result<serde_json::Value> {
    info!(tool = %tool.name, timeout_ms = millis(timeout), "Calling tool");
    println!("Calling tool '{}'", tool.name);

    match tokio::time::timeout(timeout, peer.call_tool(&tool.name, ToolArguments::new())).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout {
            tool: tool.name.clone(),
            timeout_ms: millis(timeout),
        }),
    }
}

/// Fallback tool call; every failure, a timeout included, is a plain invocation error
async fn call_fallback<P: McpPeer + ?Sized>(
    peer: &P,
    tool: &ToolInfo,
    timeout: Duration,
) -> Result<serde_json::Value> {
    info!(tool = %tool.name, "Calling fallback tool");
    println!("Calling tool '{}'", tool.name);

    let outcome = match tokio::time::timeout(timeout, peer.call_tool(&tool.name, ToolArguments::new()))
        .await
    {
        Ok(result) => result,
        Err(elapsed) => Err(ProbeError::Invocation {
            tool: tool.name.clone(),
            message: format!("{} after {}ms", elapsed, millis(timeout)),
        }),
    };

    outcome.map_err(|e| {
        debug!(tool = %tool.name, error = %e, "Fallback call failed");
        match e {
            ProbeError::Invocation { .. } => e,
            other => ProbeError::Invocation {
                tool: tool.name.clone(),
                message: other.to_string(),
            },
        }
    })
}

/// Milliseconds in `timeout`, saturating at `u64::MAX`
fn millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

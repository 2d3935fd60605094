//! mcp-probe CLI entrypoint
//! Resolves configuration, runs the probe once and maps the outcome to an exit status.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use mcp_probe::probe::config::{
    DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_RESULT_BUDGET,
    DEFAULT_TARGET_TOOL, EnvInputs, ProbeConfig, resolve_server_url,
};
use mcp_probe::{ProbeError, probe};
use std::process::ExitCode;
use std::time::Duration;

// External imports (alphabetized)
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mcp-probe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MCP server base URL, used only when MCP_APP_URL is not set
    server_url: Option<String>,
    /// Tool to invoke when the server exposes it
    #[arg(long, default_value = DEFAULT_TARGET_TOOL)]
    tool: String,
    /// Seconds to wait for the tool call
    #[arg(long, default_value_t = DEFAULT_CALL_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Seconds to wait for the connection handshake
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,
    /// Maximum characters of the tool result to print
    #[arg(long, default_value_t = DEFAULT_RESULT_BUDGET)]
    max_output: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(report) => {
            info!(tool = %report.tool, fallback = report.used_fallback, "Probe passed");
            println!("✅ Probe passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Probe failed");
            eprintln!("❌ {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> Result<probe::ProbeReport, ProbeError> {
    let env = EnvInputs::capture();

    let config = ProbeConfig::builder()
        .server_url(resolve_server_url(env.server_url, cli.server_url))
        .api_key(env.api_key)
        .target_tool(cli.tool)
        .call_timeout(Duration::from_secs(cli.timeout_secs))
        .connect_timeout(Duration::from_secs(cli.connect_timeout_secs))
        .result_budget(cli.max_output)
        .build()?;

    probe::run(&config).await
}

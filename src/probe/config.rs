//! Probe configuration resolved once at startup

use crate::mcp::client::auth::AuthConfig;
use crate::mcp::client::error::{ProbeError, Result};
use std::time::Duration;
use url::Url;

/// Environment variable holding the server base URL
pub const SERVER_URL_ENV: &str = "MCP_APP_URL";
/// Environment variable holding the optional bearer credential
pub const API_KEY_ENV: &str = "MCPAC_API_KEY";
/// Path appended to the base URL to reach the SSE endpoint
pub const SSE_PATH: &str = "sse";
/// Tool invoked when the server exposes it
pub const DEFAULT_TARGET_TOOL: &str = "example_usage";
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS);
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS);
/// Characters of the result string form that get printed
pub const DEFAULT_RESULT_BUDGET: usize = 500;

/// Raw inputs read from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    pub server_url: Option<String>,
    pub api_key: Option<String>,
}

impl EnvInputs {
    /// Read the probe variables from the current process environment
    pub fn capture() -> Self {
        Self {
            server_url: std::env::var(SERVER_URL_ENV).ok(),
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }
}

/// Pick the server URL: environment first, then the positional argument.
/// Blank values count as absent.
pub fn resolve_server_url(env_url: Option<String>, arg_url: Option<String>) -> Option<String> {
    let present = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    present(env_url).or_else(|| present(arg_url))
}

/// Validated, immutable probe configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    server_url: Url,
    auth: AuthConfig,
    target_tool: String,
    call_timeout: Duration,
    connect_timeout: Duration,
    result_budget: usize,
}

impl ProbeConfig {
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder::new()
    }

    /// `<server_url>/sse`, with exactly one slash before `sse`
    pub fn sse_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.as_str().trim_end_matches('/'),
            SSE_PATH
        )
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    pub fn target_tool(&self) -> &str {
        &self.target_tool
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn result_budget(&self) -> usize {
        self.result_budget
    }
}

/// Builder for ProbeConfig
#[derive(Debug, Default)]
pub struct ProbeConfigBuilder {
    server_url: Option<String>,
    api_key: Option<String>,
    target_tool: Option<String>,
    call_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    result_budget: Option<usize>,
}

impl ProbeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_url(mut self, url: Option<String>) -> Self {
        self.server_url = url;
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn target_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.target_tool = Some(tool.into());
        self
    }

    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn result_budget(mut self, budget: usize) -> Self {
        self.result_budget = Some(budget);
        self
    }

    pub fn build(self) -> Result<ProbeConfig> {
        let raw_url = self.server_url.ok_or_else(|| {
            ProbeError::config(format!(
                "no server URL: set {} or pass it as the first argument",
                SERVER_URL_ENV
            ))
        })?;

        let server_url = Url::parse(&raw_url)?;
        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(ProbeError::config(format!(
                "server URL must use http or https, got '{}'",
                server_url.scheme()
            )));
        }

        let auth = AuthConfig::from_api_key(self.api_key)?;

        let target_tool = self
            .target_tool
            .unwrap_or_else(|| DEFAULT_TARGET_TOOL.to_string());
        if target_tool.trim().is_empty() {
            return Err(ProbeError::config("target tool name cannot be empty"));
        }

        let call_timeout = self.call_timeout.unwrap_or(DEFAULT_CALL_TIMEOUT);
        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        if call_timeout.is_zero() || connect_timeout.is_zero() {
            return Err(ProbeError::config("timeouts must be greater than zero"));
        }

        let result_budget = self.result_budget.unwrap_or(DEFAULT_RESULT_BUDGET);
        if result_budget == 0 {
            return Err(ProbeError::config(
                "result budget must be at least one character",
            ));
        }

        Ok(ProbeConfig {
            server_url,
            auth,
            target_tool,
            call_timeout,
            connect_timeout,
            result_budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> ProbeConfig {
        ProbeConfig::builder()
            .server_url(Some(url.to_string()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_env_url_wins_over_argument() {
        let resolved = resolve_server_url(
            Some("http://from-env/".to_string()),
            Some("http://from-arg/".to_string()),
        );
        assert_eq!(resolved.as_deref(), Some("http://from-env/"));
    }

    #[test]
    fn test_argument_used_when_env_absent_or_blank() {
        let arg = Some("http://from-arg/".to_string());
        assert_eq!(
            resolve_server_url(None, arg.clone()).as_deref(),
            Some("http://from-arg/")
        );
        assert_eq!(
            resolve_server_url(Some("  ".to_string()), arg).as_deref(),
            Some("http://from-arg/")
        );
    }

    #[test]
    fn test_missing_url_is_config_error() {
        assert!(resolve_server_url(None, None).is_none());

        let result = ProbeConfig::builder().server_url(None).build();
        match result {
            Err(ProbeError::Config(msg)) => assert!(msg.contains(SERVER_URL_ENV)),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = ProbeConfig::builder()
            .server_url(Some("not a url".to_string()))
            .build();
        assert!(matches!(result, Err(ProbeError::Config(_))));

        let result = ProbeConfig::builder()
            .server_url(Some("ftp://files.example.com".to_string()))
            .build();
        assert!(matches!(result, Err(ProbeError::Config(msg)) if msg.contains("ftp")));
    }

    #[test]
    fn test_sse_endpoint_joining() {
        assert_eq!(config_for("http://x/").sse_endpoint(), "http://x/sse");
        assert_eq!(config_for("http://x").sse_endpoint(), "http://x/sse");
        assert_eq!(
            config_for("https://host:8443/mcp/").sse_endpoint(),
            "https://host:8443/mcp/sse"
        );
        assert_eq!(
            config_for("https://host/mcp").sse_endpoint(),
            "https://host/mcp/sse"
        );
    }

    #[test]
    fn test_defaults() {
        let config = config_for("http://x/");
        assert_eq!(config.target_tool(), DEFAULT_TARGET_TOOL);
        assert_eq!(config.call_timeout(), DEFAULT_CALL_TIMEOUT);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.result_budget(), DEFAULT_RESULT_BUDGET);
        assert_eq!(config.call_timeout(), Duration::from_secs(300));
        assert_eq!(config.result_budget(), 500);
        assert!(!config.auth().is_enabled());
    }

    #[test]
    fn test_api_key_enables_auth() {
        let config = ProbeConfig::builder()
            .server_url(Some("http://x/".to_string()))
            .api_key(Some("key-123".to_string()))
            .build()
            .unwrap();
        assert!(config.auth().is_enabled());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let base = || ProbeConfig::builder().server_url(Some("http://x/".to_string()));

        assert!(base().call_timeout(Duration::ZERO).build().is_err());
        assert!(base().connect_timeout(Duration::ZERO).build().is_err());
        assert!(base().result_budget(0).build().is_err());
        assert!(base().target_tool("  ").build().is_err());
    }
}

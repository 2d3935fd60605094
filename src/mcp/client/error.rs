//! Error types for the MCP probe

use thiserror::Error;

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can terminate a probe run.
///
/// Every variant is terminal: nothing is retried, and each maps to exit status 1.
/// The bracketed prefix in the display form is the marker printed on stderr.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Missing or invalid configuration (server URL, credential, limits)
    #[error("[config] {0}")]
    Config(String),

    /// The server could not be reached or did not answer the liveness check
    #[error("[connectivity] {0}")]
    Connectivity(String),

    /// The server exposes no callable tools
    #[error("[discovery] server exposes no tools")]
    NoTools,

    /// The primary tool call exceeded its deadline
    #[error("[timeout] tool '{tool}' did not respond within {timeout_ms}ms")]
    Timeout { tool: String, timeout_ms: u64 },

    /// A tool call failed, including a fallback call that ran out of time
    #[error("[invocation] tool '{tool}' failed: {message}")]
    Invocation { tool: String, message: String },

    /// Anything else raised while the connection was open
    #[error("[error] {0}")]
    Protocol(String),
}

impl ProbeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<url::ParseError> for ProbeError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid server URL: {}", err))
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("failed to decode server payload: {}", err))
    }
}

//! Bearer authentication for the MCP probe
//!
//! The probe attaches at most one credential: an optional bearer token sent as
//! `Authorization: Bearer <token>` on the SSE connection. The token is held in a
//! [`SecureCredential`] that clears its memory on drop and never prints itself.

use crate::mcp::client::error::{ProbeError, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::fmt;
use zeroize::Zeroize;

/// Secure credential storage with automatic memory clearing
#[derive(Clone)]
pub struct SecureCredential {
    value: String,
}

impl SecureCredential {
    /// Create a new credential, rejecting values that could inject headers
    pub fn new(value: String) -> Result<Self> {
        Self::validate_credential(&value)?;
        Ok(Self { value })
    }

    /// Get the credential value (limited access)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    fn validate_credential(value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ProbeError::config("API key cannot be empty"));
        }

        if value.contains('\r') || value.contains('\n') {
            return Err(ProbeError::config("API key contains line breaks"));
        }

        if value.chars().any(|c| c.is_control()) {
            return Err(ProbeError::config("API key contains control characters"));
        }

        if value.len() > 4096 {
            return Err(ProbeError::config("API key too long"));
        }

        Ok(())
    }
}

impl fmt::Debug for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureCredential(<redacted>)")
    }
}

impl Drop for SecureCredential {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Authentication settings for the probe connection
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    bearer: Option<SecureCredential>,
}

impl AuthConfig {
    /// No authentication
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an optional raw API key; `None` or a blank value disables auth
    pub fn from_api_key(key: Option<String>) -> Result<Self> {
        match key {
            Some(key) if !key.trim().is_empty() => Self::new().with_bearer_token(key),
            _ => Ok(Self::new()),
        }
    }

    /// Set bearer token authentication
    pub fn with_bearer_token(mut self, token: String) -> Result<Self> {
        self.bearer = Some(SecureCredential::new(token)?);
        Ok(self)
    }

    /// Whether a credential will be attached to requests
    pub fn is_enabled(&self) -> bool {
        self.bearer.is_some()
    }

    /// Headers to attach to every request on the connection
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(credential) = &self.bearer {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", credential.expose_secret()))
                    .map_err(|e| ProbeError::config(format!("invalid API key: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

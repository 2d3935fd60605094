//! Smoke-test probe for a remote MCP server

pub mod config;
pub mod report;
pub mod runner;

pub use config::{EnvInputs, ProbeConfig, ProbeConfigBuilder, resolve_server_url};
pub use report::ProbeReport;
pub use runner::{probe, run, run_session};

//! Service configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const BIND_ADDR_ENV: &str = "SHIPPLAN_BIND_ADDR";
pub const HISTORY_FILE_ENV: &str = "SHIPPLAN_HISTORY_FILE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON array of history records used to seed the in-memory source.
    pub history_file: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = match lookup(BIND_ADDR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("{BIND_ADDR_ENV} is not a socket address: {raw:?}"))?,
            None => {
                tracing::warn!("{BIND_ADDR_ENV} not set; using {DEFAULT_BIND_ADDR}");
                DEFAULT_BIND_ADDR
                    .parse()
                    .context("default bind address is invalid")?
            }
        };

        let history_file = lookup(HISTORY_FILE_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            history_file,
        })
    }
}

//! Environment driven settings for the saved search service.

use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8090";
pub const DEFAULT_USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub bind_addr: SocketAddr,
    /// Request header carrying the caller's user id.
    pub user_header: String,
}

impl BackendConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("SAVED_SEARCH_BIND_ADDR").ok(),
            std::env::var("SAVED_SEARCH_USER_HEADER").ok(),
        )
    }

    fn from_vars(bind_addr: Option<String>, user_header: Option<String>) -> anyhow::Result<Self> {
        let bind_addr = bind_addr.unwrap_or(DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Failed to parse SAVED_SEARCH_BIND_ADDR: {bind_addr}"))?;
        let user_header = user_header
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_USER_HEADER.to_string());
        Ok(Self { bind_addr, user_header })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8090)),
            user_header: DEFAULT_USER_HEADER.to_string(),
        }
    }
}

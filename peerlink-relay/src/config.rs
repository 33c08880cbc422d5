use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Environment variable holding the relay's listen address.
pub const RELAY_ADDR_ENV: &str = "PEERLINK_RELAY_ADDR";

pub const DEFAULT_RELAY_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl RelayConfig {
    /// Reads [`RELAY_ADDR_ENV`], falling back to [`DEFAULT_RELAY_ADDR`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(RELAY_ADDR_ENV) {
            Ok(addr) => Self::parse(&addr),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn parse(addr: &str) -> Result<Self> {
        let bind_addr = addr
            .trim()
            .parse()
            .with_context(|| format!("invalid {RELAY_ADDR_ENV} value '{addr}'"))?;
        Ok(Self { bind_addr })
    }
}

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub const ENV_LISTEN_ADDR: &str = "SP_LISTEN_ADDR";
pub const ENV_CORS_ALLOW_ORIGINS: &str = "SP_CORS_ALLOW_ORIGINS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "SP_REQUEST_TIMEOUT_MS";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 90_000;

/// Extra time the HTTP timeout layer allows past the provider chain's
/// request deadline, so the chain can still shape its own failure response.
pub const RESPONSE_GRACE: Duration = Duration::from_secs(5);

/// HTTP listener settings. Provider settings live in `ProviderConfig`.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    /// Deadline for the provider chain of one price request.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Timeout for the HTTP layer, strictly above the chain deadline.
    pub fn http_timeout(&self) -> Duration {
        self.request_timeout + RESPONSE_GRACE
    }

    /// Read settings from the process environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = lookup(ENV_LISTEN_ADDR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .with_context(|| format!("Invalid {}", ENV_LISTEN_ADDR))?;
        let cors_allow = lookup(ENV_CORS_ALLOW_ORIGINS)
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup(ENV_REQUEST_TIMEOUT_MS)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

//! Service configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Transport used to reach the upstream resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsNetwork {
    #[default]
    Udp,
    Tcp,
}

/// Configuration for a CAA checker node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// RPC listen address (default: 127.0.0.1:9090).
    #[serde(default = "default_address")]
    pub address: SocketAddr,

    /// Upstream resolver endpoint (default: 127.0.0.1:53).
    #[serde(default = "default_dns_resolver")]
    pub dns_resolver: SocketAddr,

    /// Resolver transport (default: udp).
    #[serde(default)]
    pub dns_network: DnsNetwork,

    /// Per-query resolver timeout in seconds.
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout_secs: u64,

    /// Resolver attempts per query.
    #[serde(default = "default_dns_attempts")]
    pub dns_attempts: usize,

    /// Deadline for a whole decision in seconds, 0 disables it.
    #[serde(default = "default_check_timeout")]
    pub check_timeout_secs: u64,

    /// Issuer identity matched against CAA `issue` values.
    pub issuer_domain: String,
}

impl ServerConfig {
    /// Config with defaults for everything but the issuer identity.
    pub fn new(issuer_domain: impl Into<String>) -> Self {
        Self {
            address: default_address(),
            dns_resolver: default_dns_resolver(),
            dns_network: DnsNetwork::default(),
            dns_timeout_secs: default_dns_timeout(),
            dns_attempts: default_dns_attempts(),
            check_timeout_secs: default_check_timeout(),
            issuer_domain: issuer_domain.into(),
        }
    }

    /// Load and validate config from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::SrvError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot produce meaningful decisions.
    pub fn validate(&self) -> crate::Result<()> {
        if self.issuer_domain.trim().is_empty() {
            return Err(crate::SrvError::Config(
                "issuer-domain must not be empty".into(),
            ));
        }
        if self.dns_attempts == 0 {
            return Err(crate::SrvError::Config(
                "dns-attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub const fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_secs)
    }

    /// Decision deadline, `None` when disabled.
    pub const fn check_timeout(&self) -> Option<Duration> {
        if self.check_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.check_timeout_secs))
        }
    }
}

// Default value functions for serde.
fn default_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9090))
}

fn default_dns_resolver() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 53))
}

const fn default_dns_timeout() -> u64 {
    10
}

const fn default_dns_attempts() -> usize {
    5
}

const fn default_check_timeout() -> u64 {
    30
}

//! Application settings loaded via OrthoConfig.

use std::net::SocketAddr;

use backend::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Configuration values controlling server bootstrap.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLUBHOUSE")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL; fixture ports answer when unset.
    pub database_url: Option<String>,
    /// Optional cap on pooled database connections.
    pub db_pool_max: Option<u32>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return pool settings when a database URL is configured.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            let config = PoolConfig::new(url);
            match self.db_pool_max {
                Some(max_size) => config.with_max_size(max_size),
                None => config,
            }
        })
    }
}

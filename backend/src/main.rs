//! Backend entry-point wiring configuration, persistence, and the HTTP server.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use server::{AppSettings, ServerConfig, create_server};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|error| std::io::Error::other(error.to_string()))?;
    let session = session_settings_from_env(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|error| std::io::Error::other(error.to_string()))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("clubhouse")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

/// Build metrics through the given constructor, logging and continuing on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<E: std::fmt::Display>(
    build: impl FnOnce() -> Result<actix_web_prom::PrometheusMetrics, E>,
) -> Option<actix_web_prom::PrometheusMetrics> {
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(error = %error, "metrics initialisation failed; continuing without");
            None
        }
    }
}

pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::RelayConfig;
use crate::services::fetcher::build_http_client;
use crate::services::relay::RelayService;
use crate::services::storage::S3ObjectStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with EnvFilter, falling back to `default_filter`
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();
}

/// Wire the relay against the configured B2 bucket
pub fn create_relay(config: &RelayConfig) -> anyhow::Result<RelayService> {
    let http = build_http_client()?;
    let store = Arc::new(S3ObjectStore::new(config.store.clone()));
    Ok(RelayService::new(http, store, config.staging_dir.clone()))
}

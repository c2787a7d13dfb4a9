//! sw-cache server entry point.
//!
//! Boots the caching worker, runs its install and activate events, then
//! serves the MCP tools on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use swcache_client::{FetchClient, FetchConfig, ServiceWorker};
use swcache_core::{AppConfig, CacheDb, CacheStore, MemoryStore};
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(
        db_path = %config.db_path.display(),
        origin = %config.origin,
        cache_version = %config.cache_version,
        "Starting sw-cache server on stdio transport"
    );

    let store = open_store(&config).await?;
    let fetcher = Arc::new(FetchClient::new(FetchConfig::from(&config))?);
    let worker = Arc::new(ServiceWorker::from_config(store, fetcher, &config)?);

    let install = worker.install().await;
    if !install.failed.is_empty() {
        tracing::warn!(failed = install.failed.len(), "some critical assets were not precached");
    }
    let activate = worker.activate().await?;
    tracing::info!(deleted = ?activate.deleted, "worker active");

    let handler = handler::SwCacheServer::new(worker);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    if config.uses_memory_store() {
        tracing::info!("using in-memory cache store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open cache database at {}", config.db_path.display()))?;
    Ok(Arc::new(db))
}

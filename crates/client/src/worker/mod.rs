//! The request router and its lifecycle.
//!
//! [`ServiceWorker::handle`] is the single entry point for intercepted
//! requests:
//!
//! 1. methods outside GET/POST/PUT/DELETE/PATCH get a 405
//! 2. the URL is classified
//! 3. the label's strategy produces a response
//! 4. the security headers are attached
//!
//! Lifecycle events (install, activate, sync, push) live in [`lifecycle`]
//! and [`push`].

pub mod lifecycle;
pub mod push;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use http::{Method, StatusCode};
use swcache_core::{AppConfig, CacheStore, Error, Label, PartitionNames, Request, Response, classify, headers};
use tokio::sync::RwLock;
use url::Url;

use crate::fetch::Fetcher;
use crate::strategy::StrategyExecutor;

pub use lifecycle::{ActivateReport, CRITICAL_ASSETS, InstallReport, SYNC_TAG, SyncOutcome};
pub use push::Notification;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Methods the router serves.
pub const ALLOWED_METHODS: [Method; 5] = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH];

/// Lifecycle states of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    /// Constructed, no lifecycle event seen yet.
    Parsed,
    /// Precaching critical assets.
    Installing,
    /// Installed and waiting to activate.
    Installed,
    /// Sweeping stale partitions.
    Activating,
    /// Controlling clients.
    Activated,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Parsed => write!(f, "parsed"),
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Activating => write!(f, "activating"),
            WorkerState::Activated => write!(f, "activated"),
        }
    }
}

/// Routes intercepted requests through the caching strategies.
pub struct ServiceWorker {
    executor: StrategyExecutor,
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
    partitions: PartitionNames,
    origin: Url,
    state: RwLock<WorkerState>,
    clients_claimed: AtomicBool,
}

impl ServiceWorker {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>, partitions: PartitionNames, origin: Url) -> Self {
        let executor = StrategyExecutor::new(Arc::clone(&store), Arc::clone(&fetcher), partitions.clone());
        Self {
            executor,
            store,
            fetcher,
            partitions,
            origin,
            state: RwLock::new(WorkerState::Parsed),
            clients_claimed: AtomicBool::new(false),
        }
    }

    /// Build a worker from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the configured origin does not parse.
    pub fn from_config(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>, config: &AppConfig) -> Result<Self, Error> {
        let origin = config.origin_url().map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self::new(store, fetcher, config.partition_names(), origin))
    }

    /// Serve one intercepted request.
    pub async fn handle(&self, request: Request) -> Response {
        if !is_allowed_method(&request.method) {
            tracing::debug!(method = %request.method, url = %request.url, "rejecting method");
            return headers::attach(Response::text(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED));
        }

        let label = classify(&request.url, &self.origin);
        tracing::debug!(method = %request.method, url = %request.url, %label, "routing request");

        let response = self.executor.execute(label, &request).await;
        headers::attach(response)
    }

    /// Classify without serving, for diagnostics.
    pub fn label(&self, request: &Request) -> Option<Label> {
        is_allowed_method(&request.method).then(|| classify(&request.url, &self.origin))
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn partitions(&self) -> &PartitionNames {
        &self.partitions
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed.load(Ordering::SeqCst)
    }

    async fn set_state(&self, state: WorkerState) {
        *self.state.write().await = state;
        tracing::info!(%state, "worker state changed");
    }
}

pub fn is_allowed_method(method: &Method) -> bool {
    ALLOWED_METHODS.contains(method)
}

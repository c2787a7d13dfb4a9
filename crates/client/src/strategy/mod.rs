//! Caching strategies.
//!
//! | label          | strategy               | partition |
//! |----------------|------------------------|-----------|
//! | `static-asset` | cache-first            | static    |
//! | `external-api` | network-first          | api       |
//! | `other`        | stale-while-revalidate | dynamic   |
//! | `sensitive`    | bypass                 | none      |
//!
//! Every strategy resolves to a response: network errors are recovered
//! into cached entries or fixed 503 bodies, and cache failures are logged
//! and treated as misses. Only `GET` requests read or write partitions.

mod bypass;
mod cache_first;
mod network_first;
mod revalidate;

use std::sync::Arc;

use http::StatusCode;
use swcache_core::{CacheStore, Label, PartitionKind, PartitionNames, Request, Response, StoredResponse};

use crate::fetch::Fetcher;

pub use network_first::is_api_cacheable;

pub const OFFLINE_CONTENT_NOT_AVAILABLE: &str = "Offline content not available";
pub const CONTENT_NOT_AVAILABLE_OFFLINE: &str = "Content not available offline";
pub const CONTENT_NOT_AVAILABLE: &str = "Content not available";
pub const SERVICE_UNAVAILABLE: &str = "Service unavailable";

/// The algorithm serving one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    CacheFirst,
    NetworkFirst,
    StaleWhileRevalidate,
    Bypass,
}

impl Strategy {
    pub fn for_label(label: Label) -> Self {
        match label {
            Label::Sensitive => Strategy::Bypass,
            Label::StaticAsset => Strategy::CacheFirst,
            Label::ExternalApi => Strategy::NetworkFirst,
            Label::Other => Strategy::StaleWhileRevalidate,
        }
    }
}

/// Runs a strategy against the injected store and network.
#[derive(Clone)]
pub struct StrategyExecutor {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
    partitions: PartitionNames,
}

impl StrategyExecutor {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>, partitions: PartitionNames) -> Self {
        Self { store, fetcher, partitions }
    }

    /// Serve `request` with the strategy its label selects.
    pub async fn execute(&self, label: Label, request: &Request) -> Response {
        match Strategy::for_label(label) {
            Strategy::CacheFirst => self.cache_first(request).await,
            Strategy::NetworkFirst => self.network_first(request).await,
            Strategy::StaleWhileRevalidate => self.stale_while_revalidate(request).await,
            Strategy::Bypass => self.bypass(request).await,
        }
    }

    fn partition(&self, kind: PartitionKind) -> String {
        self.partitions.name(kind)
    }
}

fn unavailable(body: &'static str) -> Response {
    Response::text(StatusCode::SERVICE_UNAVAILABLE, body)
}

/// Read `request` from `partition`. Store errors and corrupt entries count as
/// misses.
async fn lookup(store: &dyn CacheStore, partition: &str, request: &Request) -> Option<Response> {
    if !request.is_cache_eligible() {
        return None;
    }

    match store.get(partition, request.url.as_str()).await {
        Ok(Some(entry)) => match entry.to_response() {
            Ok(response) => {
                tracing::debug!(partition, url = %request.url, "cache hit");
                Some(response)
            }
            Err(e) => {
                tracing::warn!(partition, url = %request.url, error = %e, "ignoring unreadable cache entry");
                None
            }
        },
        Ok(None) => {
            tracing::debug!(partition, url = %request.url, "cache miss");
            None
        }
        Err(e) => {
            tracing::warn!(partition, url = %request.url, error = %e, "cache read failed");
            None
        }
    }
}

/// Write a clone of `response` into `partition`. Failures are logged and
/// never reach the caller.
async fn store_response(store: &dyn CacheStore, partition: &str, request: &Request, response: &Response) {
    if !request.is_cache_eligible() {
        return;
    }

    let entry = match StoredResponse::capture(&request.url, response) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!(partition, url = %request.url, error = %e, "not storing response");
            return;
        }
    };

    match store.put(partition, entry).await {
        Ok(()) => tracing::debug!(partition, url = %request.url, "stored response"),
        Err(e) => tracing::warn!(partition, url = %request.url, error = %e, "cache write failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, ScriptedFetcher, response, url};

    const INDEX: &str = "http://localhost:3000/index.html";
    const API: &str = "https://api.hubapi.com/crm/v3/objects/contacts";
    const PAGE: &str = "http://localhost:3000/tools/roi";

    fn broken_cache() -> (Arc<FailingStore>, Arc<ScriptedFetcher>, StrategyExecutor) {
        let store = Arc::new(FailingStore::default());
        let fetcher = Arc::new(ScriptedFetcher::new());
        let executor = StrategyExecutor::new(store.clone(), fetcher.clone(), PartitionNames::new("v1"));
        (store, fetcher, executor)
    }

    #[test]
    fn test_strategy_for_label() {
        assert_eq!(Strategy::for_label(Label::Sensitive), Strategy::Bypass);
        assert_eq!(Strategy::for_label(Label::StaticAsset), Strategy::CacheFirst);
        assert_eq!(Strategy::for_label(Label::ExternalApi), Strategy::NetworkFirst);
        assert_eq!(Strategy::for_label(Label::Other), Strategy::StaleWhileRevalidate);
    }

    #[tokio::test]
    async fn test_cache_first_survives_broken_cache() {
        let (store, fetcher, executor) = broken_cache();
        fetcher.route(INDEX, response(StatusCode::OK, "text/html", "<html>app</html>"));

        let result = executor.execute(Label::StaticAsset, &Request::get(url(INDEX))).await;
        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(&result.body[..], b"<html>app</html>");
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(store.gets(), 1);
        assert_eq!(store.puts(), 1);
    }

    #[tokio::test]
    async fn test_network_first_survives_broken_cache() {
        let (store, fetcher, executor) = broken_cache();
        fetcher.route(API, response(StatusCode::OK, "application/json", "{\"results\":[]}"));

        let result = executor.execute(Label::ExternalApi, &Request::get(url(API))).await;
        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(&result.body[..], b"{\"results\":[]}");
        assert_eq!(store.puts(), 1);

        fetcher.set_offline(true);
        let offline = executor.execute(Label::ExternalApi, &Request::get(url(API))).await;
        assert_eq!(offline.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(&offline.body[..], CONTENT_NOT_AVAILABLE_OFFLINE.as_bytes());
        assert_eq!(store.gets(), 1);
    }

    #[tokio::test]
    async fn test_revalidate_survives_broken_cache() {
        let (store, fetcher, executor) = broken_cache();
        fetcher.route(PAGE, response(StatusCode::OK, "text/html", "roi"));

        let result = executor.execute(Label::Other, &Request::get(url(PAGE))).await;
        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(&result.body[..], b"roi");
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(store.gets(), 1);
        assert_eq!(store.puts(), 1);
    }
}

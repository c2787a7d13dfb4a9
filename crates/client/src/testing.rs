//! Scripted network for strategy and worker tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use swcache_core::{CacheStore, Error, Request, Response, StoredResponse};
use url::Url;

use crate::fetch::Fetcher;

/// A [`Fetcher`] that serves canned responses by URL.
///
/// Unknown URLs get a 404. Switching it offline makes every fetch fail with
/// a network error; calls are counted either way.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    routes: Mutex<HashMap<String, Response>>,
    offline: AtomicBool,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Delay every response, so revalidation outlives the request.
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub(crate) fn route(&self, url: &str, response: Response) {
        self.routes.lock().unwrap().insert(url.to_string(), response);
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Network(format!("{}: offline", request.url)));
        }
        let routed = self.routes.lock().unwrap().get(request.url.as_str()).cloned();
        Ok(routed.unwrap_or_else(|| Response::text(StatusCode::NOT_FOUND, "not found")))
    }
}

/// A [`CacheStore`] whose reads and writes always fail.
///
/// Partition bookkeeping succeeds so lifecycle code can still run against it.
#[derive(Default)]
pub(crate) struct FailingStore {
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl FailingStore {
    pub(crate) fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub(crate) fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for FailingStore {
    async fn open(&self, _partition: &str) -> Result<(), Error> {
        Ok(())
    }

    async fn get(&self, partition: &str, url: &str) -> Result<Option<StoredResponse>, Error> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(Error::CorruptEntry(format!("{partition}: {url}: unreadable row")))
    }

    async fn put(&self, _partition: &str, _entry: StoredResponse) -> Result<(), Error> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(Error::Database(tokio_rusqlite::Error::ConnectionClosed))
    }

    async fn delete(&self, _partition: &str, _url: &str) -> Result<bool, Error> {
        Ok(false)
    }

    async fn partitions(&self) -> Result<Vec<String>, Error> {
        Ok(Vec::new())
    }

    async fn delete_partition(&self, _partition: &str) -> Result<bool, Error> {
        Ok(false)
    }
}

/// A response with the given status, content type and body, carrying a
/// matching `content-length`.
pub(crate) fn response(status: StatusCode, content_type: &'static str, body: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    Response::new(status, headers, body)
}

pub(crate) fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

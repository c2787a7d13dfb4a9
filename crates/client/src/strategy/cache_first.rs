use http::StatusCode;
use swcache_core::{PartitionKind, Request, Response};

use super::{OFFLINE_CONTENT_NOT_AVAILABLE, StrategyExecutor, lookup, store_response, unavailable};

impl StrategyExecutor {
    /// Serve from the static partition, filling it from the network on a miss.
    ///
    /// Non-200 network responses pass through uncached.
    pub(crate) async fn cache_first(&self, request: &Request) -> Response {
        let partition = self.partition(PartitionKind::Static);

        if let Some(hit) = lookup(self.store.as_ref(), &partition, request).await {
            return hit;
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.status == StatusCode::OK {
                    store_response(self.store.as_ref(), &partition, request, &response).await;
                }
                response
            }
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "cache-first fetch failed");
                unavailable(OFFLINE_CONTENT_NOT_AVAILABLE)
            }
        }
    }
}

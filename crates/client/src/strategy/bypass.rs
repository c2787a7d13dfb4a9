use swcache_core::{Request, Response};

use super::{SERVICE_UNAVAILABLE, StrategyExecutor, unavailable};

impl StrategyExecutor {
    /// Network only. Sensitive responses never touch a partition, not even
    /// for a read.
    pub(crate) async fn bypass(&self, request: &Request) -> Response {
        match self.fetcher.fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "sensitive fetch failed");
                unavailable(SERVICE_UNAVAILABLE)
            }
        }
    }
}

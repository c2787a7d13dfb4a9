use std::sync::Arc;

use http::StatusCode;
use swcache_core::{CacheStore, PartitionKind, Request, Response};

use super::{CONTENT_NOT_AVAILABLE, StrategyExecutor, lookup, store_response, unavailable};
use crate::fetch::Fetcher;

impl StrategyExecutor {
    /// Serve the dynamic partition's entry at once while refreshing it in the
    /// background.
    ///
    /// The refresh is a detached task: when a stale entry exists the response
    /// is returned without waiting and the task keeps running. Without one,
    /// the caller waits for the refresh and gets its response.
    pub(crate) async fn stale_while_revalidate(&self, request: &Request) -> Response {
        let partition = self.partition(PartitionKind::Dynamic);
        let stale = lookup(self.store.as_ref(), &partition, request).await;

        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);
        let owned = request.clone();
        let refresh = tokio::spawn(async move { revalidate(store, fetcher, partition, owned).await });

        if let Some(stale) = stale {
            return stale;
        }

        match refresh.await {
            Ok(Some(fresh)) => fresh,
            Ok(None) => unavailable(CONTENT_NOT_AVAILABLE),
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "revalidation task failed");
                unavailable(CONTENT_NOT_AVAILABLE)
            }
        }
    }
}

/// Fetch `request` and store a 200 into `partition`. `None` means no update
/// is available.
async fn revalidate(
    store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>, partition: String, request: Request,
) -> Option<Response> {
    match fetcher.fetch(&request).await {
        Ok(response) => {
            if response.status == StatusCode::OK {
                store_response(store.as_ref(), &partition, &request, &response).await;
            }
            Some(response)
        }
        Err(e) => {
            // The stale entry stays in place; it is only replaced by a later success.
            tracing::warn!(url = %request.url, error = %e, "revalidation failed");
            None
        }
    }
}

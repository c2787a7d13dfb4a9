use http::StatusCode;
use swcache_core::{PartitionKind, Request, Response};

use super::{CONTENT_NOT_AVAILABLE_OFFLINE, StrategyExecutor, lookup, store_response, unavailable};

/// Media types allowed into the api partition; `image/*` is matched by prefix.
const CACHEABLE_MEDIA_TYPES: &[&str] =
    &["application/json", "text/plain", "text/html", "application/javascript", "text/css"];

/// Whether an external API response may be stored: `200 OK`, an allowed
/// media type and an explicit `content-length`.
pub fn is_api_cacheable(response: &Response) -> bool {
    if response.status != StatusCode::OK || !response.has_content_length() {
        return false;
    }

    response
        .media_type()
        .is_some_and(|media| media.starts_with("image/") || CACHEABLE_MEDIA_TYPES.contains(&media.as_str()))
}

impl StrategyExecutor {
    /// Prefer the network, falling back to the api partition when offline.
    pub(crate) async fn network_first(&self, request: &Request) -> Response {
        let partition = self.partition(PartitionKind::Api);

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if is_api_cacheable(&response) {
                    store_response(self.store.as_ref(), &partition, request, &response).await;
                } else {
                    tracing::debug!(
                        url = %request.url,
                        status = response.status.as_u16(),
                        "api response not eligible for caching"
                    );
                }
                response
            }
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "network-first fetch failed, trying cache");
                match lookup(self.store.as_ref(), &partition, request).await {
                    Some(cached) => cached,
                    None => unavailable(CONTENT_NOT_AVAILABLE_OFFLINE),
                }
            }
        }
    }
}

//! cache_purge tool implementation.
//!
//! Removes one entry, or a whole partition when no URL is given.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::{ServiceWorker, canonicalize};
use swcache_core::{CacheStore, Error, PartitionKind};

use crate::tools::json_result;

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Partition to purge (static, dynamic or api).
    pub partition: PartitionKind,

    /// Entry to remove. Without it the whole partition is deleted.
    #[serde(default)]
    pub url: Option<String>,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    pub partition: String,
    /// Whether anything existed to remove.
    pub removed: bool,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(worker: &ServiceWorker, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    let partition = worker.partitions().name(params.partition);
    let store = worker.store();

    let removed = match params.url.as_deref().map(str::trim) {
        Some("") => return Err(Error::InvalidInput("url cannot be empty".into()).into()),
        Some(url) => {
            let url = canonicalize(url, worker.origin()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
            store.delete(&partition, url.as_str()).await?
        }
        None => store.delete_partition(&partition).await?,
    };

    tracing::info!(partition, url = ?params.url, removed, "cache purge");

    json_result(&CachePurgeOutput { partition, removed })
}

//! cache_get tool implementation.
//!
//! Reads one stored entry out of a current partition.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::{ServiceWorker, canonicalize};
use swcache_core::{CacheStore, Error, PartitionKind};

use crate::tools::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Partition to read from (static, dynamic or api).
    pub partition: PartitionKind,

    /// Cached URL, absolute or relative to the configured origin.
    pub url: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// Versioned partition name, e.g. `static-v1`.
    pub partition: String,
    pub url: String,
    pub status: u16,
    /// Stored headers, values lossily decoded as UTF-8.
    pub headers: Vec<(String, String)>,
    /// Stored body, lossily decoded as UTF-8.
    pub body: String,
    /// RFC 3339 timestamp of the write.
    pub stored_at: String,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(worker: &ServiceWorker, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let url = canonicalize(&params.url, worker.origin()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let partition = worker.partitions().name(params.partition);

    let entry = worker
        .store()
        .get(&partition, url.as_str())
        .await?
        .ok_or_else(|| Error::CacheMiss(format!("{partition}: {url}")))?;

    let headers = entry
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), String::from_utf8_lossy(value).into_owned()))
        .collect();

    let output = CacheGetOutput {
        partition,
        body: String::from_utf8_lossy(&entry.body).into_owned(),
        url: entry.url,
        status: entry.status,
        headers,
        stored_at: entry.stored_at,
    };

    json_result(&output)
}

//! cache_list tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::ServiceWorker;
use swcache_core::CacheStore;

use crate::tools::json_result;

/// Output from the cache_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheListOutput {
    /// Every partition in the store, sorted by name.
    pub partitions: Vec<String>,
    /// The partition names of the running version.
    pub current: Vec<String>,
    /// Partitions the next activation would delete.
    pub stale: Vec<String>,
}

/// Implementation of the cache_list tool.
pub async fn list_impl(worker: &ServiceWorker) -> Result<CallToolResult, McpError> {
    let names = worker.partitions();
    let partitions = worker.store().partitions().await?;
    let stale = partitions.iter().filter(|name| !names.is_current(name)).cloned().collect();

    json_result(&CacheListOutput { partitions, current: names.all(), stale })
}

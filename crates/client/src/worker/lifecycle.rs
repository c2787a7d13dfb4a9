//! Install, activate and background sync.

use std::sync::atomic::Ordering;

use http::StatusCode;
use schemars::JsonSchema;
use serde::Serialize;
use swcache_core::{Error, PartitionKind, Request, StoredResponse};

use super::{ServiceWorker, WorkerState};

/// Assets precached into the static partition at install, relative to the
/// configured origin.
pub const CRITICAL_ASSETS: &[&str] =
    &["/", "/index.html", "/static/js/bundle.js", "/static/css/main.css", "/manifest.json"];

/// Tag of the one background sync the worker handles.
pub const SYNC_TAG: &str = "background-sync";

/// What install managed to precache.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct InstallReport {
    /// Partition that received the assets.
    pub partition: String,
    /// Asset URLs now cached.
    pub cached: Vec<String>,
    /// Asset URLs that could not be cached, with the reason.
    pub failed: Vec<(String, String)>,
    /// Always true: a new worker never waits for old clients to close.
    pub skip_waiting: bool,
}

/// What activation swept away.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ActivateReport {
    /// Partitions deleted because they belong to no current name.
    pub deleted: Vec<String>,
    /// Partitions kept.
    pub retained: Vec<String>,
    pub clients_claimed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    Completed,
    Ignored,
}

impl ServiceWorker {
    /// Precache the critical assets.
    ///
    /// A failing asset is logged and reported; it never aborts the install.
    pub async fn install(&self) -> InstallReport {
        self.set_state(WorkerState::Installing).await;

        let partition = self.partitions.name(PartitionKind::Static);
        if let Err(e) = self.store.open(&partition).await {
            tracing::warn!(partition, error = %e, "failed to open static partition");
        }

        let mut cached = Vec::new();
        let mut failed = Vec::new();
        for asset in CRITICAL_ASSETS {
            let url = match self.origin.join(asset) {
                Ok(url) => url,
                Err(e) => {
                    failed.push((asset.to_string(), e.to_string()));
                    continue;
                }
            };

            match self.precache(&partition, Request::get(url.clone())).await {
                Ok(()) => cached.push(url.to_string()),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "precache failed");
                    failed.push((url.to_string(), e.to_string()));
                }
            }
        }

        tracing::info!(partition, cached = cached.len(), failed = failed.len(), "install complete");

        self.set_state(WorkerState::Installed).await;

        InstallReport { partition, cached, failed, skip_waiting: true }
    }

    async fn precache(&self, partition: &str, request: Request) -> Result<(), Error> {
        let response = self.fetcher.fetch(&request).await?;
        if response.status != StatusCode::OK {
            return Err(Error::NotCacheable(response.status.as_u16()));
        }
        let entry = StoredResponse::capture(&request.url, &response)?;
        self.store.put(partition, entry).await
    }

    /// Delete every partition that is not one of the current names, then
    /// take control of open clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the partitions cannot be listed. A failed delete
    /// is logged and the partition reported as retained.
    pub async fn activate(&self) -> Result<ActivateReport, Error> {
        self.set_state(WorkerState::Activating).await;

        let mut deleted = Vec::new();
        let mut retained = Vec::new();
        for name in self.store.partitions().await? {
            if self.partitions.is_current(&name) {
                retained.push(name);
                continue;
            }

            match self.store.delete_partition(&name).await {
                Ok(_) => {
                    tracing::info!(partition = %name, "deleted stale partition");
                    deleted.push(name);
                }
                Err(e) => {
                    tracing::warn!(partition = %name, error = %e, "failed to delete stale partition");
                    retained.push(name);
                }
            }
        }

        self.clients_claimed.store(true, Ordering::SeqCst);
        self.set_state(WorkerState::Activated).await;

        Ok(ActivateReport { deleted, retained, clients_claimed: true })
    }

    /// Handle a background sync event. Shares no state with the caches.
    pub fn sync(&self, tag: &str) -> SyncOutcome {
        if tag == SYNC_TAG {
            tracing::info!(tag, "background sync completed");
            SyncOutcome::Completed
        } else {
            tracing::debug!(tag, "ignoring unknown sync tag");
            SyncOutcome::Ignored
        }
    }
}

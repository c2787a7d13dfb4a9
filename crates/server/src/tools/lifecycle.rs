//! Lifecycle event tools: install, activate, push and sync.
//!
//! Each tool fires one event at the worker and returns what it did.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::{ActivateReport, InstallReport, Notification, ServiceWorker, SyncOutcome, WorkerState};

use super::json_result;

/// Output from sw_install.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct InstallOutput {
    #[serde(flatten)]
    pub report: InstallReport,
    pub state: WorkerState,
}

/// Output from sw_activate.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ActivateOutput {
    #[serde(flatten)]
    pub report: ActivateReport,
    pub state: WorkerState,
}

/// Parameters for the sw_push tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SwPushParams {
    /// Raw push payload, normally a JSON object with title, body, icon,
    /// badge and url fields.
    #[serde(default)]
    pub payload: Option<String>,
}

/// Parameters for the sw_sync tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwSyncParams {
    /// Sync tag registered by the page.
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SyncOutput {
    pub tag: String,
    pub outcome: SyncOutcome,
}

pub async fn install_impl(worker: &ServiceWorker) -> Result<CallToolResult, McpError> {
    let report = worker.install().await;
    json_result(&InstallOutput { report, state: worker.state().await })
}

pub async fn activate_impl(worker: &ServiceWorker) -> Result<CallToolResult, McpError> {
    let report = worker.activate().await?;
    json_result(&ActivateOutput { report, state: worker.state().await })
}

pub fn push_impl(worker: &ServiceWorker, params: SwPushParams) -> Result<CallToolResult, McpError> {
    let payload = params.payload.unwrap_or_default();
    let notification: Notification = worker.push(payload.as_bytes());
    json_result(&notification)
}

pub fn sync_impl(worker: &ServiceWorker, params: SwSyncParams) -> Result<CallToolResult, McpError> {
    let outcome = worker.sync(params.tag.trim());
    json_result(&SyncOutput { tag: params.tag, outcome })
}

//! Push notification payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ServiceWorker;

const DEFAULT_TITLE: &str = "New notification";
const DEFAULT_ICON: &str = "/logo192.png";
const DEFAULT_BADGE: &str = "/favicon.ico";

/// Fields a push payload may carry; everything is optional.
#[derive(Debug, Default, Deserialize)]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    url: Option<String>,
}

/// A notification ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Page to open when the notification is clicked.
    pub url: String,
}

impl Notification {
    /// Build a notification from a raw push payload.
    ///
    /// Anything that is not a JSON object is treated as an empty object.
    pub fn from_payload(payload: &[u8]) -> Self {
        let payload: PushPayload = if payload.is_empty() {
            PushPayload::default()
        } else {
            serde_json::from_slice(payload).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "malformed push payload, using defaults");
                PushPayload::default()
            })
        };

        Self {
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.unwrap_or_default(),
            icon: payload.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            badge: payload.badge.unwrap_or_else(|| DEFAULT_BADGE.to_string()),
            url: payload.url.unwrap_or_else(|| "/".to_string()),
        }
    }
}

impl ServiceWorker {
    /// Handle a push event.
    pub fn push(&self, payload: &[u8]) -> Notification {
        let notification = Notification::from_payload(payload);
        tracing::info!(title = %notification.title, "showing notification");
        notification
    }
}

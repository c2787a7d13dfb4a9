//! sw_fetch tool implementation.
//!
//! Routes one request through the worker exactly as an intercepted page
//! request would be, and reports the response it produced.

use std::collections::BTreeMap;

use http::{HeaderName, HeaderValue, Method};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::{ServiceWorker, canonicalize};
use swcache_core::{Error, Label, Request};

use super::json_result;

/// Input parameters for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchParams {
    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Absolute URL, or a path resolved against the configured origin.
    pub url: String,

    /// Request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Request body (UTF-8).
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".into()
}

/// Output structure for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchOutput {
    /// Canonical request URL, which is also the cache key.
    pub url: String,
    /// Classification, absent when the method was rejected.
    pub label: Option<Label>,
    pub status: u16,
    pub status_text: String,
    /// Response headers; repeated headers are joined with ", ".
    pub headers: BTreeMap<String, String>,
    /// Response body, lossily decoded as UTF-8.
    pub body: String,
}

/// Implementation of the sw_fetch tool.
pub async fn fetch_impl(worker: &ServiceWorker, params: SwFetchParams) -> Result<CallToolResult, McpError> {
    let request = build_request(worker, params)?;
    let label = worker.label(&request);
    let url = request.url.to_string();

    let response = worker.handle(request).await;

    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &response.headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match headers.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                headers.insert(name.as_str().to_string(), value.into_owned());
            }
        }
    }

    let output = SwFetchOutput {
        url,
        label,
        status: response.status.as_u16(),
        status_text: response.status_text().to_string(),
        headers,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    };

    json_result(&output)
}

fn build_request(worker: &ServiceWorker, params: SwFetchParams) -> Result<Request, Error> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()));
    }

    let method = Method::from_bytes(params.method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| Error::InvalidInput(format!("invalid method: {}", params.method)))?;
    let url = canonicalize(&params.url, worker.origin()).map_err(|e| Error::InvalidUrl(e.to_string()))?;

    let mut request = Request::new(method, url);
    for (name, value) in &params.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidInput(format!("invalid header name: {name}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::InvalidInput(format!("invalid value for header {name}")))?;
        request.headers.append(name, value);
    }
    if let Some(body) = params.body {
        request.body = body.into();
    }

    Ok(request)
}

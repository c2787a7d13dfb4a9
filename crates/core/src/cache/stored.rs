//! Immutable response snapshots.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;
use crate::message::Response;

/// A response captured at the time it was cached.
///
/// Only `200 OK` responses can be captured, so every stored entry replays
/// as a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub url: String,
    pub status: u16,
    /// Header values are raw bytes; they need not be UTF-8.
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
    pub stored_at: String,
}

impl StoredResponse {
    /// Snapshot `response` for storage under `url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotCacheable` for any status other than 200.
    pub fn capture(url: &Url, response: &Response) -> Result<Self, Error> {
        if response.status != StatusCode::OK {
            return Err(Error::NotCacheable(response.status.as_u16()));
        }

        let headers = response
            .headers
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
            .collect();

        Ok(Self {
            url: url.as_str().to_string(),
            status: response.status.as_u16(),
            headers,
            body: response.body.to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Rebuild a response from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Error::CorruptEntry` if the status or a header no longer
    /// parses.
    pub fn to_response(&self) -> Result<Response, Error> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| Error::CorruptEntry(format!("{}: status {}: {e}", self.url, self.status)))?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::CorruptEntry(format!("{}: header {name}: {e}", self.url)))?;
            let value = HeaderValue::from_bytes(value)
                .map_err(|e| Error::CorruptEntry(format!("{}: header {name}: {e}", self.url)))?;
            headers.append(name, value);
        }

        Ok(Response::new(status, headers, self.body.clone()))
    }
}

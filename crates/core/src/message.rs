//! Request and response values passed between the router, the strategies
//! and the network.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use url::Url;

/// An intercepted request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Request {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Shorthand for a bodiless `GET`.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Only `GET` requests are ever read from or written to a partition.
    pub fn is_cache_eligible(&self) -> bool {
        self.method == Method::GET
    }
}

/// A response returned to the page, either from the network or rebuilt from
/// a stored snapshot.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self { status, headers, body: body.into() }
    }

    /// A short `text/plain` response, used for every synthesized fallback.
    pub fn text(status: StatusCode, body: &'static str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        Self { status, headers, body: Bytes::from_static(body.as_bytes()) }
    }

    /// Canonical reason phrase for the status, e.g. `"Service Unavailable"`.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Media type without parameters, lowercased.
    pub fn media_type(&self) -> Option<String> {
        let raw = self.headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let media = raw.split(';').next()?.trim().to_ascii_lowercase();
        if media.is_empty() { None } else { Some(media) }
    }

    pub fn has_content_length(&self) -> bool {
        self.headers.contains_key(header::CONTENT_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response() {
        let response = Response::text(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable");
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status_text(), "Service Unavailable");
        assert_eq!(&response.body[..], b"Service unavailable");
        assert_eq!(response.media_type().as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_media_type_strips_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("Application/JSON; charset=utf-8"));
        let response = Response::new(StatusCode::OK, headers, "{}");
        assert_eq!(response.media_type().as_deref(), Some("application/json"));
        assert!(!response.has_content_length());
    }

    #[test]
    fn test_cache_eligibility() {
        let url = Url::parse("https://example.com/").unwrap();
        assert!(Request::get(url.clone()).is_cache_eligible());
        assert!(!Request::new(Method::POST, url).is_cache_eligible());
    }
}

//! Security headers attached to every response leaving the router.

use http::{HeaderName, HeaderValue};

use crate::message::Response;

pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; \
     img-src 'self' data: https:; font-src 'self' data:; connect-src 'self' https:; object-src 'none'; \
     base-uri 'self'; frame-ancestors 'none'";

/// Header name (lowercase) and value pairs.
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// Return `response` with the security header set merged in.
///
/// Status and body are untouched. An injected header replaces every
/// same-named header already present.
pub fn attach(response: Response) -> Response {
    let Response { status, mut headers, body } = response;
    for (name, value) in SECURITY_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    Response { status, headers, body }
}

/// Whether every security header is present with its exact value.
pub fn has_security_headers(response: &Response) -> bool {
    SECURITY_HEADERS.iter().all(|(name, value)| {
        let mut values = response.headers.get_all(*name).iter();
        matches!((values.next(), values.next()), (Some(v), None) if v == *value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode, header};

    #[test]
    fn test_attach_preserves_status_and_body() {
        let response = attach(Response::new(StatusCode::CREATED, HeaderMap::new(), "payload"));
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(&response.body[..], b"payload");
        assert!(has_security_headers(&response));
    }

    #[test]
    fn test_attach_overwrites_existing() {
        let mut headers = HeaderMap::new();
        headers.append(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
        headers.append(header::X_FRAME_OPTIONS, HeaderValue::from_static("ALLOW-FROM x"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let response = attach(Response::new(StatusCode::OK, headers, ""));
        let frame: Vec<_> = response.headers.get_all(header::X_FRAME_OPTIONS).iter().collect();
        assert_eq!(frame, vec!["DENY"]);
        assert_eq!(response.headers.get(header::CACHE_CONTROL).unwrap(), "no-cache");
    }

    #[test]
    fn test_missing_header_detected() {
        let response = Response::new(StatusCode::OK, HeaderMap::new(), "");
        assert!(!has_security_headers(&response));
    }
}

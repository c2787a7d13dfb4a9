//! URL canonicalization for cache keys.
//!
//! Partition entries are keyed by the serialized URL, so two spellings of
//! the same resource must canonicalize to the same string.

use url::Url;

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string, resolving relative references against `origin`.
///
/// - Leading/trailing whitespace is trimmed.
/// - Paths starting with `/` resolve against `origin`.
/// - Bare hosts (`example.com/x`) get an `https://` scheme.
/// - Only http and https survive; the url crate lowercases the host.
/// - The fragment is dropped; the query string is kept as-is.
pub fn canonicalize(input: &str, origin: &Url) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = if trimmed.starts_with('/') && !trimmed.starts_with("//") {
        origin.join(trimmed)
    } else if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("https://{trimmed}"))
    }
    .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("http://localhost:3000").unwrap()
    }

    #[test]
    fn test_relative_path_uses_origin() {
        let url = canonicalize("/index.html", &origin()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/index.html");
    }

    #[test]
    fn test_absolute_url_ignores_origin() {
        let url = canonicalize("https://API.OPENAI.COM/v1/models", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models");
    }

    #[test]
    fn test_bare_host_defaults_to_https() {
        let url = canonicalize("example.com/page", &origin()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_dropped_query_kept() {
        let url = canonicalize("  /tools?b=2&a=1#top  ", &origin()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/tools?b=2&a=1");
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = canonicalize("file:///etc/passwd", &origin());
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(canonicalize("   ", &origin()), Err(UrlError::Empty)));
    }
}

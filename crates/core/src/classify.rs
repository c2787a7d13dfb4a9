//! Request URL classification.
//!
//! Every intercepted request gets exactly one [`Label`], which decides the
//! caching strategy. The checks run in a fixed order and the first one that
//! matches wins:
//!
//! 1. `sensitive`: the path matches an auth/secret pattern
//! 2. `static-asset`: the URL names a build artifact, or is the app's root
//! 3. `external-api`: the URL belongs to an allow-listed API origin
//! 4. `other`

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Path patterns for endpoints that carry credentials or session state.
/// Matched case-sensitively against the URL path.
pub const SENSITIVE_PATTERNS: &[&str] = &[
    r"/api/",
    r"/auth/",
    r"/login",
    r"/admin",
    r"token",
    r"key",
    r"password",
    r"secret",
    r"session",
    r"oauth",
    r"credentials",
];

/// Build artifacts served cache-first. The app origin's root is matched exactly,
/// everything else by substring of the full URL.
pub const STATIC_ASSETS: &[&str] = &[
    "/index.html",
    "/static/js/bundle.js",
    "/static/css/main.css",
    "/manifest.json",
    "/favicon.ico",
    "/logo192.png",
    "/logo512.png",
];

/// External API origins served network-first.
pub const EXTERNAL_API_ORIGINS: &[&str] = &[
    "https://api.openai.com",
    "https://api.hubapi.com",
    "https://api.semrush.com",
    "https://www.googleapis.com",
];

static SENSITIVE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SENSITIVE_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Classification of a request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    Sensitive,
    StaticAsset,
    ExternalApi,
    Other,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Sensitive => "sensitive",
            Label::StaticAsset => "static-asset",
            Label::ExternalApi => "external-api",
            Label::Other => "other",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a request URL.
///
/// `origin` is the app's own origin; only its root counts as a static asset.
pub fn classify(url: &Url, origin: &Url) -> Label {
    if is_sensitive(url) {
        return Label::Sensitive;
    }

    let full = url.as_str();
    if is_app_root(url, origin) || STATIC_ASSETS.iter().any(|asset| full.contains(asset)) {
        return Label::StaticAsset;
    }

    if EXTERNAL_API_ORIGINS.iter().any(|origin| full.contains(origin)) {
        return Label::ExternalApi;
    }

    Label::Other
}

fn is_app_root(url: &Url, origin: &Url) -> bool {
    url.path() == "/" && url.origin() == origin.origin()
}

fn is_sensitive(url: &Url) -> bool {
    let path = url.path();
    SENSITIVE.iter().any(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(url: &str) -> Label {
        let origin = Url::parse("http://localhost:3000").unwrap();
        classify(&Url::parse(url).unwrap(), &origin)
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(SENSITIVE.len(), SENSITIVE_PATTERNS.len());
    }

    #[test]
    fn test_sensitive_paths() {
        assert_eq!(label("https://app.test/api/private/token"), Label::Sensitive);
        assert_eq!(label("https://app.test/auth/callback"), Label::Sensitive);
        assert_eq!(label("https://app.test/login"), Label::Sensitive);
        assert_eq!(label("https://app.test/admin/users"), Label::Sensitive);
        assert_eq!(label("https://app.test/reset-password"), Label::Sensitive);
        assert_eq!(label("https://app.test/oauth2/authorize"), Label::Sensitive);
    }

    #[test]
    fn test_sensitive_is_case_sensitive() {
        assert_eq!(label("https://app.test/LOGIN"), Label::Other);
    }

    #[test]
    fn test_sensitive_checks_path_only() {
        assert_eq!(label("https://app.test/tools?api_key=1"), Label::Other);
    }

    #[test]
    fn test_sensitive_wins_over_static() {
        assert_eq!(label("https://app.test/admin/index.html"), Label::Sensitive);
        assert_eq!(label("https://app.test/static/js/bundle.js?x=/session"), Label::StaticAsset);
        assert_eq!(label("https://app.test/session/static/css/main.css"), Label::Sensitive);
    }

    #[test]
    fn test_static_assets() {
        assert_eq!(label("http://localhost:3000/"), Label::StaticAsset);
        assert_eq!(label("http://localhost:3000/index.html"), Label::StaticAsset);
        assert_eq!(label("http://localhost:3000/static/css/main.css"), Label::StaticAsset);
        assert_eq!(label("http://localhost:3000/manifest.json"), Label::StaticAsset);
    }

    #[test]
    fn test_root_static_only_on_app_origin() {
        assert_eq!(label("http://localhost:3000/?utm=x"), Label::StaticAsset);
        assert_eq!(label("https://api.openai.com/"), Label::ExternalApi);
        assert_eq!(label("https://cdn.example.com/"), Label::Other);
        assert_eq!(label("https://localhost:3000/"), Label::Other);
    }

    #[test]
    fn test_external_api() {
        assert_eq!(label("https://www.googleapis.com/pagespeedonline/v5/runPagespeed"), Label::ExternalApi);
        assert_eq!(label("https://api.semrush.com/analytics/v1/"), Label::ExternalApi);
    }

    #[test]
    fn test_external_api_sensitive_path() {
        assert_eq!(label("https://api.openai.com/v1/chat"), Label::ExternalApi);
        assert_eq!(label("https://api.hubapi.com/oauth/v1/token"), Label::Sensitive);
    }

    #[test]
    fn test_other() {
        assert_eq!(label("http://localhost:3000/tools/ltv-calculator"), Label::Other);
        assert_eq!(label("https://cdn.example.com/font.woff2"), Label::Other);
    }

    #[test]
    fn test_label_serde() {
        assert_eq!(serde_json::to_string(&Label::StaticAsset).unwrap(), "\"static-asset\"");
        assert_eq!(Label::ExternalApi.to_string(), "external-api");
    }
}

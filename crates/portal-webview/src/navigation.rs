//! Navigation allowlist.
//!
//! The site's own origin, bundled content and `about:blank` are always
//! allowed; extra origins come from config. Everything else is blocked.

use reqwest::Url;

/// Prefixes that are allowed regardless of the configured site.
pub const ALWAYS_ALLOWED_PREFIXES: &[&str] = &[
    "portal://",
    // WebView2 rewrites custom protocols: portal://localhost/… → http://portal.localhost/…
    "http://portal.localhost",
    "about:blank",
];

#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    /// Serialized origins, e.g. `https://example.com`.
    origins: Vec<String>,
}

impl NavigationPolicy {
    /// Build a policy from the site URL (if remote) and extra origins.
    /// Entries that do not parse as URLs are skipped.
    pub fn new<'a>(site: Option<&'a str>, extra: impl IntoIterator<Item = &'a str>) -> Self {
        let origins = site
            .into_iter()
            .chain(extra)
            .filter_map(origin_of)
            .collect();
        Self { origins }
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        if ALWAYS_ALLOWED_PREFIXES
            .iter()
            .any(|prefix| url.starts_with(prefix))
        {
            return true;
        }
        match origin_of(url) {
            Some(origin) => self.origins.iter().any(|allowed| *allowed == origin),
            None => false,
        }
    }
}

/// The ASCII origin of an http(s) URL.
fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    Some(parsed.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NavigationPolicy {
        NavigationPolicy::new(
            Some("https://shop.example.com/app?x=1"),
            ["https://accounts.example.com", "https://cdn.example.net/"],
        )
    }

    #[test]
    fn allows_site_origin() {
        let p = policy();
        assert!(p.is_allowed("https://shop.example.com/"));
        assert!(p.is_allowed("https://shop.example.com/cart?item=3"));
    }

    #[test]
    fn allows_configured_origins() {
        let p = policy();
        assert!(p.is_allowed("https://accounts.example.com/login"));
        assert!(p.is_allowed("https://cdn.example.net/lib.js"));
    }

    #[test]
    fn allows_bundled_and_blank() {
        let p = NavigationPolicy::default();
        assert!(p.is_allowed("portal://localhost/index.html"));
        assert!(p.is_allowed("http://portal.localhost/index.html"));
        assert!(p.is_allowed("about:blank"));
    }

    #[test]
    fn blocks_other_origins() {
        let p = policy();
        assert!(!p.is_allowed("https://evil.com"));
        assert!(!p.is_allowed("https://shop.example.com.evil.com/"));
        assert!(!p.is_allowed("http://shop.example.com/"));
        assert!(!p.is_allowed("https://shop.example.com:8443/"));
    }

    #[test]
    fn blocks_non_web_schemes() {
        let p = policy();
        assert!(!p.is_allowed("file:///etc/passwd"));
        assert!(!p.is_allowed("javascript:alert(1)"));
        assert!(!p.is_allowed("data:text/html,<h1>x</h1>"));
        assert!(!p.is_allowed(""));
        assert!(!p.is_allowed("not-a-url"));
    }

    #[test]
    fn skips_unparseable_origins() {
        let p = NavigationPolicy::new(None, ["nope", "https://ok.example"]);
        assert_eq!(p.origins(), ["https://ok.example".to_string()]);
    }
}

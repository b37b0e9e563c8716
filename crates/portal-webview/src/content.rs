//! Bundled content served over the `portal://` custom protocol.
//!
//! A request for `portal://localhost/index.html` resolves to
//! `{base_dir}/index.html`. Nothing outside `base_dir` is ever served.

use std::borrow::Cow;
use std::path::PathBuf;

use portal_common::mime_from_extension;
use tracing::warn;

/// Custom protocol scheme for bundled content.
pub const SCHEME: &str = "portal";

/// Origin bundled pages are served from.
pub const ORIGIN: &str = "portal://localhost";

pub struct ContentProvider {
    base_dir: PathBuf,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a request path to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('/');
        let clean = if clean.is_empty() { "index.html" } else { clean };

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            warn!(path = %clean, "bundled content request outside base dir");
            return None;
        }
        if !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&canonical_file), data))
    }

    /// Strip the scheme and host from a custom-protocol request URI.
    pub fn request_path(uri: &str) -> &str {
        uri.strip_prefix("portal://localhost/")
            .or_else(|| uri.strip_prefix("portal://localhost"))
            .or_else(|| uri.strip_prefix("http://portal.localhost/"))
            .or_else(|| uri.strip_prefix("portal:///"))
            .or_else(|| uri.strip_prefix("portal://"))
            .unwrap_or("")
    }

    /// Build the protocol response for a request URI.
    pub fn respond(&self, uri: &str) -> wry::http::Response<Cow<'static, [u8]>> {
        let path = Self::request_path(uri);
        let response = match self.resolve(path) {
            Some((mime, data)) => wry::http::Response::builder()
                .status(200)
                .header("Content-Type", mime)
                .header("Access-Control-Allow-Origin", ORIGIN)
                .body(Cow::from(data)),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                wry::http::Response::builder()
                    .status(404)
                    .header("Content-Type", "text/plain")
                    .body(Cow::from(b"Not Found".to_vec()))
            }
        };
        response.unwrap_or_else(|_| wry::http::Response::new(Cow::from(Vec::new())))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/app.css"), "body{}").unwrap();
        dir
    }

    #[test]
    fn resolves_files_with_mime() {
        let dir = site();
        let cp = ContentProvider::new(dir.path());
        let (mime, data) = cp.resolve("index.html").unwrap();
        assert_eq!(mime, "text/html");
        assert_eq!(data, b"<html>home</html>");
        assert_eq!(cp.resolve("/css/app.css").unwrap().0, "text/css");
    }

    #[test]
    fn empty_path_is_index() {
        let dir = site();
        let cp = ContentProvider::new(dir.path());
        assert_eq!(cp.resolve("").unwrap().0, "text/html");
        assert_eq!(cp.resolve("/").unwrap().0, "text/html");
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let dir = site();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve("index.html?v=2").is_some());
        assert!(cp.resolve("index.html#top").is_some());
    }

    #[test]
    fn traversal_is_blocked() {
        let outer = tempfile::tempdir().unwrap();
        fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let inner = outer.path().join("site");
        fs::create_dir(&inner).unwrap();
        fs::write(inner.join("index.html"), "ok").unwrap();

        let cp = ContentProvider::new(&inner);
        assert!(cp.resolve("../secret.txt").is_none());
        assert!(cp.resolve("css/../../secret.txt").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn directories_and_missing_files_are_not_served() {
        let dir = site();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve("css").is_none());
        assert!(cp.resolve("missing.html").is_none());
    }

    #[test]
    fn request_path_strips_origin() {
        assert_eq!(
            ContentProvider::request_path("portal://localhost/a/b.html"),
            "a/b.html"
        );
        assert_eq!(
            ContentProvider::request_path("http://portal.localhost/a.html"),
            "a.html"
        );
        assert_eq!(ContentProvider::request_path("https://other/a.html"), "");
    }

    #[test]
    fn respond_sets_status() {
        let dir = site();
        let cp = ContentProvider::new(dir.path());
        let ok = cp.respond("portal://localhost/index.html");
        assert_eq!(ok.status(), 200);
        assert_eq!(ok.headers()["Content-Type"], "text/html");
        let missing = cp.respond("portal://localhost/nope.html");
        assert_eq!(missing.status(), 404);
    }
}

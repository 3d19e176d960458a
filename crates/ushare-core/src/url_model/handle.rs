//! Handle derivation from a link.

use super::normalize::normalize_url;

/// Derives a display handle from a link.
///
/// The link is normalized and parsed; the path without its leading slashes
/// is returned when non-empty, otherwise the hostname. If the link cannot be
/// parsed the original input comes back unchanged.
///
/// # Examples
///
/// - `derive_handle("mysite.com/alice")` → `"alice"`
/// - `derive_handle("https://example.com/?q=1")` → `"example.com"`
pub fn derive_handle(url: &str) -> String {
    let parsed = match url::Url::parse(&normalize_url(url)) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(input = url, "could not parse link for handle: {err}");
            return url.to_string();
        }
    };
    let path = parsed.path().trim_start_matches('/');
    if !path.is_empty() {
        return path.to_string();
    }
    parsed.host_str().unwrap_or_default().to_string()
}

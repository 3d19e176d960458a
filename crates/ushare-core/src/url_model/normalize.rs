//! Link canonicalization.

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// True if `value` starts with `http://` or `https://`, ignoring ASCII case.
pub fn has_http_scheme(value: &str) -> bool {
    starts_with_ignore_case(value, HTTP) || starts_with_ignore_case(value, HTTPS)
}

/// Canonicalizes a raw link into an absolute HTTP(S) URL.
///
/// - `""` stays `""`
/// - values already carrying an `http://`/`https://` scheme (any case) are returned unchanged
/// - anything else gets `https://` prepended
///
/// No host/path validation happens here; downstream URL parsing decides that.
pub fn normalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if has_http_scheme(raw) {
        return raw.to_string();
    }
    format!("{HTTPS}{}", strip_http_scheme(raw))
}

/// Removes one leading `http://`/`https://` prefix, if any.
fn strip_http_scheme(value: &str) -> &str {
    for prefix in [HTTPS, HTTP] {
        if starts_with_ignore_case(value, prefix) {
            return &value[prefix.len()..];
        }
    }
    value
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

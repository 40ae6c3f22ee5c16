//! Short path normalization
//!
//! A short path is stored with exactly one leading slash and no trailing
//! slashes. Nothing else is touched: case, whitespace and percent-encoding
//! pass through as typed.

/// Canonicalize a user-supplied short path into its storage key.
///
/// - prepends `/` when missing
/// - strips every trailing `/`
///
/// An input made only of slashes (or empty) collapses to `""`; callers
/// decide whether that is a validation failure or a miss.
pub fn normalize_short_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Lookup key for an inbound request.
///
/// The raw query string is part of the key, so `/a?x=1` and `/a` are
/// different short links.
pub fn lookup_key(request_path: &str, query_string: &str) -> String {
    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
    if query_string.is_empty() {
        normalize_short_path(request_path)
    } else {
        normalize_short_path(&format!("{}?{}", request_path, query_string))
    }
}

/// External URL for a short path: plain concatenation of prefix and path
#[inline]
pub fn short_link(prefix: &str, short_path: &str) -> String {
    format!("{}{}", prefix, short_path)
}

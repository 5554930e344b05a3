/// Path utilities for normalization and location splitting
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Normalize a path before matching or redirect lookup
///
/// Removes exactly one trailing slash unless the path is the root `/`.
/// Nothing else is touched: no case folding, no percent-decoding, no
/// collapsing of repeated slashes.
///
/// Returns `Cow::Borrowed` when the input needs no change.
///
/// # Examples
///
/// ```
/// use naglfar_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("/"), "/");
///
/// // Only one slash is removed
/// assert_eq!(normalize_path("/about//"), "/about/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    match path.strip_suffix('/') {
        Some(trimmed) if path != "/" => Cow::Borrowed(trimmed),
        _ => Cow::Borrowed(path),
    }
}

/// Splits a raw location into its path and search parts
///
/// The search part keeps its leading `?`; a `#fragment` is discarded.
///
/// # Examples
///
/// ```
/// use naglfar_router::path::split_location;
///
/// assert_eq!(split_location("/t3/dog?test=123"), ("/t3/dog", "?test=123"));
/// assert_eq!(split_location("/t3/dog#top"), ("/t3/dog", ""));
/// assert_eq!(split_location("/t3/dog"), ("/t3/dog", ""));
/// ```
pub fn split_location(raw: &str) -> (&str, &str) {
    let without_hash = raw.split_once('#').map(|(head, _)| head).unwrap_or(raw);

    match without_hash.find('?') {
        Some(idx) => without_hash.split_at(idx),
        None => (without_hash, ""),
    }
}

/// Returns the query fragment of a search string without the leading `?`
///
/// ```
/// use naglfar_router::path::query_fragment;
///
/// assert_eq!(query_fragment("?a=1"), "a=1");
/// assert_eq!(query_fragment(""), "");
/// ```
pub fn query_fragment(search: &str) -> &str {
    search.split_once('?').map(|(_, query)| query).unwrap_or("")
}
